//! MCP server exposing the scanner as remote tools.
//!
//! Speaks JSON-RPC 2.0 over newline-delimited stdio. The two scan tools map
//! 1:1 onto the library entry points; tool failures come back as structured
//! JSON-RPC errors, never as a raised error over the wire.

use crate::error::Result;
use crate::rules::RuleRegistry;
use crate::Scanner;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, info};

/// MCP protocol version.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "risk-audit";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.to_string(),
            }),
        }
    }
}

/// Stdio MCP server for the scanner.
pub struct McpServer;

impl McpServer {
    pub fn new() -> Self {
        Self
    }

    /// Run the server until stdin closes.
    pub async fn run(&self) -> Result<()> {
        info!("MCP server starting on stdio");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = tokio::io::BufReader::new(stdin);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!("Received: {}", trimmed);

            let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => {
                    // JSON-RPC 2.0: a request without an id is a notification
                    // and must not get a response
                    if request.id.is_none() {
                        debug!("Handling notification: {}", request.method);
                        let _ = self.handle_request(request);
                        continue;
                    }
                    self.handle_request(request)
                }
                Err(e) => {
                    let id = serde_json::from_str::<Value>(trimmed)
                        .ok()
                        .and_then(|raw| raw.get("id").cloned())
                        .filter(|id| !id.is_null());
                    match id {
                        Some(id) => JsonRpcResponse::error(
                            Some(id),
                            -32700,
                            &format!("Parse error: {}", e),
                        ),
                        None => {
                            debug!("Parse error without id, not responding: {}", e);
                            continue;
                        }
                    }
                }
            };

            let response_str = serde_json::to_string(&response)? + "\n";
            stdout.write_all(response_str.as_bytes()).await?;
            stdout.flush().await?;
        }

        Ok(())
    }

    fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": MCP_VERSION,
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": SERVER_VERSION
                    },
                    "capabilities": {
                        "tools": {}
                    }
                }),
            ),
            "initialized" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tool_call(id, request.params),
            _ => {
                JsonRpcResponse::error(id, -32601, &format!("Method not found: {}", request.method))
            }
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "tools": [
                    {
                        "name": "get_version",
                        "description": "Return server version information",
                        "inputSchema": {
                            "type": "object",
                            "properties": {},
                            "additionalProperties": false
                        }
                    },
                    {
                        "name": "list_rules",
                        "description": "List the active scanning rules",
                        "inputSchema": {
                            "type": "object",
                            "properties": {},
                            "additionalProperties": false
                        }
                    },
                    {
                        "name": "scan_file",
                        "description": "Scan a single file path",
                        "inputSchema": {
                            "type": "object",
                            "properties": { "path": { "type": "string" } },
                            "required": ["path"],
                            "additionalProperties": false
                        }
                    },
                    {
                        "name": "scan_project",
                        "description": "Scan a project directory",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "root": { "type": "string" },
                                "include": { "type": "array", "items": { "type": "string" } },
                                "exclude": { "type": "array", "items": { "type": "string" } }
                            },
                            "required": ["root"],
                            "additionalProperties": false
                        }
                    }
                ]
            }),
        )
    }

    fn handle_tool_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let tool_name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let result = self.dispatch(tool_name, arguments);
        match result {
            Ok(value) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{
                        "type": "text",
                        "text": serde_json::to_string_pretty(&value)
                            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
                    }]
                }),
            ),
            Err(message) => JsonRpcResponse::error(id, -32000, &message),
        }
    }

    fn dispatch(&self, tool_name: &str, arguments: Value) -> std::result::Result<Value, String> {
        match tool_name {
            "get_version" => Ok(json!({
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "description": env!("CARGO_PKG_DESCRIPTION")
            })),
            "list_rules" => {
                let registry = RuleRegistry::load(None, Vec::new());
                serde_json::to_value(registry.rules()).map_err(|e| e.to_string())
            }
            "scan_file" => {
                let path = arguments
                    .get("path")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| "scan_file requires a 'path' argument".to_string())?;
                let scanner = Scanner::for_root(Path::new("."));
                let findings = scanner.scan_file(Path::new(path));
                Ok(json!({ "findings": findings }))
            }
            "scan_project" => {
                let root = arguments
                    .get("root")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| "scan_project requires a 'root' argument".to_string())?;
                let include = string_array(&arguments, "include");
                let exclude = string_array(&arguments, "exclude");
                let scanner = Scanner::for_root(Path::new(root));
                let result = scanner
                    .scan_project(Path::new(root), include.as_deref(), exclude.as_deref())
                    .map_err(|e| e.to_string())?;
                serde_json::to_value(result).map_err(|e| e.to_string())
            }
            other => Err(format!("Unknown tool: {}", other)),
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn string_array(arguments: &Value, key: &str) -> Option<Vec<String>> {
    arguments.get(key).and_then(|v| v.as_array()).map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(1)),
            method: method.into(),
            params,
        }
    }

    #[test]
    fn initialize_advertises_tools_capability() {
        let server = McpServer::new();
        let response = server.handle_request(request("initialize", json!({})));
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], MCP_VERSION);
        assert_eq!(result["serverInfo"]["name"], "risk-audit");
    }

    #[test]
    fn tools_list_has_both_scan_entry_points() {
        let server = McpServer::new();
        let response = server.handle_request(request("tools/list", json!({})));
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        let names: Vec<&str> = tools
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"scan_file"));
        assert!(names.contains(&"scan_project"));
        assert!(names.contains(&"list_rules"));
        assert!(names.contains(&"get_version"));
    }

    #[test]
    fn unknown_method_is_structured_error() {
        let server = McpServer::new();
        let response = server.handle_request(request("bogus/method", json!({})));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn unknown_tool_is_structured_error() {
        let server = McpServer::new();
        let response = server.handle_request(request(
            "tools/call",
            json!({"name": "nope", "arguments": {}}),
        ));
        assert_eq!(response.error.unwrap().code, -32000);
    }

    #[test]
    fn scan_project_on_missing_root_is_structured_error() {
        let server = McpServer::new();
        let response = server.handle_request(request(
            "tools/call",
            json!({"name": "scan_project", "arguments": {"root": "/nonexistent"}}),
        ));
        assert!(response.error.is_some());
    }

    #[test]
    fn get_version_reports_package_metadata() {
        let server = McpServer::new();
        let response = server.handle_request(request(
            "tools/call",
            json!({"name": "get_version", "arguments": {}}),
        ));
        let result = response.result.unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains(SERVER_VERSION));
    }
}
