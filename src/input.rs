use crate::error::ToolError;
use crate::mcp::contracts::{MAX_INPUT_BYTES, SUPPORTED_FORMATS};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// A document read from disk that passed the existence and format gates.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub bytes: Vec<u8>,
    pub format: String,
    pub path: String,
}

/// Lower-cased extension without the dot; empty when the path has none.
pub fn format_from_path(path: &Path) -> String {
    path.extension()
        .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Checks existence, then format, then reads the whole file. No content is
/// read unless the first two gates pass.
pub fn load_document(path: &str) -> Result<SourceDocument, ToolError> {
    let path_ref = Path::new(path);
    if !path_ref.exists() {
        debug!(path, "document not found");
        return Err(ToolError::NotFound {
            path: path.to_string(),
        });
    }

    let format = format_from_path(path_ref);
    if !SUPPORTED_FORMATS.contains(&format.as_str()) {
        debug!(path, format = %format, "document format rejected");
        return Err(ToolError::UnsupportedFormat {
            format,
            supported: SUPPORTED_FORMATS,
        });
    }

    let bytes = read_all(path_ref).map_err(|source| ToolError::Read {
        path: path.to_string(),
        source,
    })?;
    debug!(path, format = %format, bytes = bytes.len(), "document read");

    Ok(SourceDocument {
        bytes,
        format,
        path: path.to_string(),
    })
}

fn read_all(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

pub fn string_arg(args: &Value, name: &str) -> Result<String, ToolError> {
    let obj = args
        .as_object()
        .ok_or_else(|| ToolError::invalid_input("arguments must be an object"))?;
    let value = obj
        .get(name)
        .ok_or_else(|| ToolError::invalid_input(format!("{name} is required")))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ToolError::invalid_input(format!("{name} must be a string")))
}

/// Reads a bytes argument sent either as a base64 string or as an array of
/// integers in 0..=255.
pub fn bytes_arg(args: &Value, name: &str) -> Result<Vec<u8>, ToolError> {
    bytes_arg_within(args, name, MAX_INPUT_BYTES)
}

fn bytes_arg_within(args: &Value, name: &str, max: u64) -> Result<Vec<u8>, ToolError> {
    let obj = args
        .as_object()
        .ok_or_else(|| ToolError::invalid_input("arguments must be an object"))?;
    let value = obj
        .get(name)
        .ok_or_else(|| ToolError::invalid_input(format!("{name} is required")))?;

    let bytes = match value {
        Value::String(encoded) => STANDARD
            .decode(encoded.trim().as_bytes())
            .map_err(|_| ToolError::invalid_input(format!("{name} must be valid base64")))?,
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|byte| u8::try_from(byte).ok())
                    .ok_or_else(|| {
                        ToolError::invalid_input(format!(
                            "{name} array items must be integers in 0..=255"
                        ))
                    })
            })
            .collect::<Result<Vec<u8>, _>>()?,
        _ => {
            return Err(ToolError::invalid_input(format!(
                "{name} must be a base64 string or an array of bytes"
            )));
        }
    };

    let len = bytes.len() as u64;
    if len > max {
        return Err(ToolError::TooLarge { len, max });
    }
    Ok(bytes)
}
