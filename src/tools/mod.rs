use crate::engine::{ConversionEngine, MarkdownEngine};
use crate::error::ToolError;
use serde_json::{Value, json};

pub mod add;
pub mod binary_document;
pub mod document_path;

/// State shared by every tool invocation. Read-only after startup.
pub struct ToolContext {
    engine: Box<dyn ConversionEngine>,
}

impl ToolContext {
    pub fn new(engine: impl ConversionEngine + 'static) -> Self {
        Self {
            engine: Box::new(engine),
        }
    }

    pub fn engine(&self) -> &dyn ConversionEngine {
        self.engine.as_ref()
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(MarkdownEngine)
    }
}

pub fn success_result(text: impl Into<String>, structured: Value) -> Value {
    json!({
        "content": [{"type": "text", "text": text.into()}],
        "structuredContent": {"result": structured},
        "isError": false
    })
}

pub fn text_result(text: String) -> Value {
    let structured = json!(text);
    success_result(text, structured)
}

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

pub fn tool_error_result(err: &ToolError) -> Value {
    error_result(err.kind(), err.to_string(), err.path())
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::engine::ConversionEngine;
    use crate::error::EngineError;

    /// Echoes text input back with a format banner; rejects anything that
    /// is not UTF-8.
    pub struct EchoEngine;

    impl ConversionEngine for EchoEngine {
        fn convert(&self, bytes: &[u8], format_hint: &str) -> Result<String, EngineError> {
            match std::str::from_utf8(bytes) {
                Ok(text) => Ok(format!("# {format_hint}\n\n{text}")),
                Err(_) => Err(EngineError::NotText {
                    format: format_hint.to_string(),
                }),
            }
        }
    }
}
