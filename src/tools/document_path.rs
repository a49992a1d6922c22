use crate::engine::ConversionEngine;
use crate::error::ToolError;
use crate::input::{load_document, string_arg};
use crate::tools::binary_document::binary_document_to_markdown;
use crate::tools::{ToolContext, text_result, tool_error_result};
use serde_json::Value;
use tracing::debug;

pub fn call(ctx: &ToolContext, args: &Value) -> Value {
    let file_path = match string_arg(args, "file_path") {
        Ok(file_path) => file_path,
        Err(err) => return tool_error_result(&err),
    };

    match document_path_to_markdown(ctx.engine(), &file_path) {
        Ok(markdown) => text_result(markdown),
        Err(err) => tool_error_result(&err),
    }
}

pub fn document_path_to_markdown(
    engine: &dyn ConversionEngine,
    file_path: &str,
) -> Result<String, ToolError> {
    let document = load_document(file_path)?;

    let markdown = binary_document_to_markdown(engine, &document.bytes, &document.format)
        .map_err(|source| ToolError::PathConversion {
            path: document.path.clone(),
            source: Box::new(source),
        })?;
    debug!(path = file_path, output_len = markdown.len(), "converted document");
    Ok(markdown)
}
