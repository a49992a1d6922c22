use crate::tools::{self, ToolContext};
use serde_json::{Value, json};

pub mod contracts;
pub mod errors;

pub type Handler = fn(&ToolContext, &Value) -> Value;

pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [contracts::ToolParam],
    pub handler: Handler,
}

impl ToolDescriptor {
    pub fn definition(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": contracts::input_schema(self.params)
        })
    }
}

/// Fixed tool table, built once at startup.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: vec![
                ToolDescriptor {
                    name: contracts::TOOL_ADD,
                    description: "Add two numbers.",
                    params: contracts::ADD_PARAMS,
                    handler: tools::add::call,
                },
                ToolDescriptor {
                    name: contracts::TOOL_BINARY_DOCUMENT_TO_MARKDOWN,
                    description: "Convert binary document data (PDF, DOCX, and other common \
                                  formats) to markdown-formatted text.",
                    params: contracts::BINARY_DOCUMENT_PARAMS,
                    handler: tools::binary_document::call,
                },
                ToolDescriptor {
                    name: contracts::TOOL_DOCUMENT_PATH_TO_MARKDOWN,
                    description: "Convert a PDF or DOCX file on disk to markdown-formatted text.",
                    params: contracts::DOCUMENT_PATH_PARAMS,
                    handler: tools::document_path::call,
                },
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn definitions(&self) -> Vec<Value> {
        self.tools.iter().map(ToolDescriptor::definition).collect()
    }

    pub fn call(&self, ctx: &ToolContext, name: &str, args: &Value) -> Value {
        match self.get(name) {
            Some(tool) => (tool.handler)(ctx, args),
            None => tools::error_result(
                errors::INVALID_INPUT,
                format!("unknown tool: {name}"),
                Some(name),
            ),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
