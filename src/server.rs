//! MCP stdio server.
//!
//! One JSON-RPC message per line on stdin, one response per line on stdout.
//! Requests are handled one at a time on the calling thread.

use crate::mcp::contracts::PROTOCOL_VERSION;
use crate::mcp::{ToolRegistry, errors};
use crate::tools::{self, ToolContext};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

pub struct Server {
    registry: ToolRegistry,
    ctx: ToolContext,
}

impl Server {
    pub fn new(registry: ToolRegistry, ctx: ToolContext) -> Self {
        Self { registry, ctx }
    }

    pub fn run<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<()> {
        info!("MCP server listening on stdio");

        for line in reader.lines() {
            let line = line.context("failed to read stdin")?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line) {
                let serialized =
                    serde_json::to_string(&response).context("failed to serialize response")?;
                writeln!(writer, "{serialized}").context("failed to write response")?;
                writer.flush().context("failed to flush response")?;
            }
        }

        info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Returns `None` for notifications.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "unparseable request");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("parse error: {err}"),
                ));
            }
        };

        // A notification has no `id` member at all; `"id": null` still gets a reply.
        let is_notification = value.get("id").is_none();
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(err) => {
                return Some(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("invalid request: {err}"),
                ));
            }
        };

        if is_notification {
            debug!(method = %request.method, "notification");
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!({
                    "tools": self.registry.definitions()
                }),
            ),
            "tools/call" => JsonRpcResponse::success(id, self.handle_tool_call(&request.params)),
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            ),
        };
        Some(response)
    }

    fn handle_tool_call(&self, params: &Value) -> Value {
        let Some(params) = params.as_object() else {
            return tools::error_result(errors::INVALID_INPUT, "params must be an object", None);
        };

        let Some(name) = params.get("name").and_then(|value| value.as_str()) else {
            return tools::error_result(
                errors::INVALID_INPUT,
                "params.name must be a string",
                None,
            );
        };

        let args = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        debug!(tool = name, "tool call");
        let result = self.registry.call(&self.ctx, name, &args);
        if result.get("isError").and_then(Value::as_bool) == Some(true) {
            let error = result
                .pointer("/structuredContent/error/message")
                .and_then(Value::as_str)
                .unwrap_or("tool error");
            warn!(tool = name, error, "tool call failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn server() -> Server {
        Server::new(ToolRegistry::new(), ToolContext::default())
    }

    fn respond(line: &str) -> Value {
        let response = server().handle_line(line).expect("response");
        serde_json::to_value(response).expect("json")
    }

    #[test]
    fn initialize_reports_server_info() {
        let response = respond(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#);
        assert_eq!(response["id"], json!(1));
        assert_eq!(response["result"]["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(response["result"]["serverInfo"]["name"], json!("mcp-docs"));
    }

    #[test]
    fn notifications_get_no_response() {
        let response =
            server().handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#);
        assert!(response.is_none());
    }

    #[test]
    fn null_id_is_a_request() {
        let response = respond(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#);
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[test]
    fn parse_error_has_null_id() {
        let response = respond("{not json");
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], json!(PARSE_ERROR));
        assert!(response.get("result").is_none());
    }

    #[test]
    fn missing_method_is_invalid_request() {
        let response = respond(r#"{"jsonrpc":"2.0","id":4}"#);
        assert_eq!(response["id"], json!(4));
        assert_eq!(response["error"]["code"], json!(INVALID_REQUEST));
    }

    #[test]
    fn unknown_method() {
        let response = respond(r#"{"jsonrpc":"2.0","id":"x","method":"resources/list"}"#);
        assert_eq!(response["id"], json!("x"));
        assert_eq!(response["error"]["code"], json!(METHOD_NOT_FOUND));
    }

    #[test]
    fn tools_call_requires_name() {
        let response = respond(r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{}}"#);
        assert_eq!(response["result"]["isError"], json!(true));
        assert_eq!(
            response["result"]["structuredContent"]["error"]["message"],
            json!("params.name must be a string")
        );
    }

    #[test]
    fn run_writes_one_line_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"add","arguments":{"a":1,"b":2.5}}}"#,
            "\n",
        );
        let mut output = Vec::new();
        server()
            .run(Cursor::new(input), &mut output)
            .expect("run");

        let lines: Vec<Value> = String::from_utf8(output)
            .expect("utf8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["result"], json!({}));
        assert_eq!(lines[1]["result"]["structuredContent"]["result"], json!(3.5));
    }
}
