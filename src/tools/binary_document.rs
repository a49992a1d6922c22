use crate::engine::ConversionEngine;
use crate::error::ToolError;
use crate::input::{bytes_arg, string_arg};
use crate::tools::{ToolContext, text_result, tool_error_result};
use serde_json::Value;
use tracing::debug;

pub fn call(ctx: &ToolContext, args: &Value) -> Value {
    let request = bytes_arg(args, "binary_data")
        .and_then(|bytes| Ok((bytes, string_arg(args, "file_type")?)));
    let (bytes, file_type) = match request {
        Ok(request) => request,
        Err(err) => return tool_error_result(&err),
    };

    match binary_document_to_markdown(ctx.engine(), &bytes, &file_type) {
        Ok(markdown) => text_result(markdown),
        Err(err) => tool_error_result(&err),
    }
}

/// Hands the bytes and `file_type` to the engine untouched; `file_type` is
/// not checked against the supported set here.
pub fn binary_document_to_markdown(
    engine: &dyn ConversionEngine,
    bytes: &[u8],
    file_type: &str,
) -> Result<String, ToolError> {
    debug!(bytes = bytes.len(), file_type, "converting document bytes");
    let markdown = engine.convert(bytes, file_type)?;
    debug!(output_len = markdown.len(), "converted document bytes");
    Ok(markdown)
}
