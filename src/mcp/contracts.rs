use serde_json::{Map, Value, json};

pub const TOOL_ADD: &str = "add";
pub const TOOL_BINARY_DOCUMENT_TO_MARKDOWN: &str = "binary_document_to_markdown";
pub const TOOL_DOCUMENT_PATH_TO_MARKDOWN: &str = "document_path_to_markdown";

pub const PROTOCOL_VERSION: &str = "2025-06-18";

pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

/// Extensions `document_path_to_markdown` accepts. The binary tool does not
/// consult this list.
pub const SUPPORTED_FORMATS: &[&str] = &["pdf", "docx"];

/// One declared tool parameter. All parameters are required.
#[derive(Debug, Clone, Copy)]
pub struct ToolParam {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub content_encoding: Option<&'static str>,
}

impl ToolParam {
    const fn new(name: &'static str, kind: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            content_encoding: None,
        }
    }
}

pub const ADD_PARAMS: &[ToolParam] = &[
    ToolParam::new("a", "number", "First number to add"),
    ToolParam::new("b", "number", "Second number to add"),
];

pub const BINARY_DOCUMENT_PARAMS: &[ToolParam] = &[
    ToolParam {
        name: "binary_data",
        kind: "string",
        description: "Raw binary data of the document to convert (base64-encoded)",
        content_encoding: Some("base64"),
    },
    ToolParam::new(
        "file_type",
        "string",
        "File extension/type (e.g., 'docx', 'pdf', 'txt')",
    ),
];

pub const DOCUMENT_PATH_PARAMS: &[ToolParam] = &[ToolParam::new(
    "file_path",
    "string",
    "Path to the document file to convert (PDF or DOCX)",
)];

/// JSON Schema object for a parameter list; properties keep declaration order.
pub fn input_schema(params: &[ToolParam]) -> Value {
    let mut properties = Map::new();
    for param in params {
        let mut property = json!({
            "type": param.kind,
            "description": param.description,
        });
        if let (Some(encoding), Some(obj)) = (param.content_encoding, property.as_object_mut()) {
            obj.insert("contentEncoding".to_string(), json!(encoding));
        }
        properties.insert(param.name.to_string(), property);
    }

    let required: Vec<&str> = params.iter().map(|param| param.name).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}
