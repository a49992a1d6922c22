use crate::mcp::errors;
use std::io;
use thiserror::Error;

/// Failure raised by a conversion engine for a single document.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("pdf parse failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("docx container unreadable: {0}")]
    Docx(#[from] zip::result::ZipError),
    #[error("docx markup unreadable: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("docx is missing {0}")]
    MissingPart(&'static str),
    #[error("{format} input is not valid text")]
    NotText { format: String },
    #[error("no converter for format {0:?}")]
    UnsupportedFormat(String),
    #[error("failed to read document stream: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("input exceeds limit: {len} bytes (max {max})")]
    TooLarge { len: u64, max: u64 },
    #[error("file not found: {path}")]
    NotFound { path: String },
    #[error(
        "unsupported file type {format:?}; supported types: {}",
        .supported.join(", ")
    )]
    UnsupportedFormat {
        format: String,
        supported: &'static [&'static str],
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("conversion failed: {0}")]
    Conversion(#[from] EngineError),
    #[error("failed to convert {path}: {source}")]
    PathConversion {
        path: String,
        #[source]
        source: Box<ToolError>,
    },
}

impl ToolError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable kind reported to clients in `structuredContent.error.kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::InvalidInput(_) => errors::INVALID_INPUT,
            ToolError::TooLarge { .. } => errors::TOO_LARGE,
            ToolError::NotFound { .. } => errors::NOT_FOUND,
            ToolError::UnsupportedFormat { .. } => errors::UNSUPPORTED_FORMAT,
            ToolError::Read { .. } => errors::READ_ERROR,
            ToolError::Conversion(_) => errors::CONVERSION_FAILED,
            ToolError::PathConversion { source, .. } => source.kind(),
        }
    }

    /// Filesystem path the failure refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            ToolError::NotFound { path }
            | ToolError::Read { path, .. }
            | ToolError::PathConversion { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn path_conversion_keeps_inner_kind() {
        let inner = ToolError::Conversion(EngineError::UnsupportedFormat("xyz".to_string()));
        let err = ToolError::PathConversion {
            path: "/tmp/doc.pdf".to_string(),
            source: Box::new(inner),
        };
        assert_eq!(err.kind(), errors::CONVERSION_FAILED);
        assert_eq!(err.path(), Some("/tmp/doc.pdf"));
        assert!(err.to_string().contains("/tmp/doc.pdf"));
        assert!(err.to_string().contains("xyz"));
        assert!(err.source().is_some());
    }

    #[test]
    fn unsupported_format_lists_supported_set() {
        let err = ToolError::UnsupportedFormat {
            format: "txt".to_string(),
            supported: &["pdf", "docx"],
        };
        assert_eq!(err.kind(), errors::UNSUPPORTED_FORMAT);
        assert_eq!(
            err.to_string(),
            "unsupported file type \"txt\"; supported types: pdf, docx"
        );
    }

    #[test]
    fn read_error_chains_io_cause() {
        let err = ToolError::Read {
            path: "a.pdf".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), errors::READ_ERROR);
        let cause = err.source().expect("cause");
        assert_eq!(cause.to_string(), "denied");
    }
}
