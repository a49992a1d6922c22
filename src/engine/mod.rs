//! Document-to-markdown conversion.
//!
//! [`MarkdownEngine`] dispatches on the format hint to a converter for the
//! declared format. When that converter rejects the bytes but they decode as
//! plain text, the text is returned verbatim instead of an error.

use crate::error::EngineError;
use tracing::debug;

mod docx;
mod pdf;
mod text;

pub trait ConversionEngine: Send + Sync {
    /// Converts `bytes`, interpreted according to `format_hint`, to markdown.
    fn convert(&self, bytes: &[u8], format_hint: &str) -> Result<String, EngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownEngine;

impl ConversionEngine for MarkdownEngine {
    fn convert(&self, bytes: &[u8], format_hint: &str) -> Result<String, EngineError> {
        if bytes.is_empty() {
            return Ok(String::new());
        }

        let format = normalize_hint(format_hint);
        let converted = match format.as_str() {
            "pdf" => pdf::to_markdown(bytes),
            "docx" => docx::to_markdown(bytes),
            "csv" => text::csv_to_markdown(bytes),
            other if text::is_text_format(other) => text::passthrough(bytes, other),
            other => Err(EngineError::UnsupportedFormat(other.to_string())),
        };

        converted.or_else(|error| match text::decode(bytes) {
            Some(text) => {
                debug!(format = %format, %error, "converter rejected input, returning it as text");
                Ok(text.to_string())
            }
            None => Err(error),
        })
    }
}

/// Lower-cases a format hint and strips surrounding whitespace and one
/// leading dot, so `".PDF"` and `"pdf"` select the same converter.
pub fn normalize_hint(hint: &str) -> String {
    let hint = hint.trim();
    hint.strip_prefix('.').unwrap_or(hint).to_ascii_lowercase()
}
