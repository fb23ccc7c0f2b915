use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The one protocol error code on this wire. Parse failures, unknown
/// methods and unknown resources all collapse onto it.
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Outbound envelope. Exactly one of `result`/`error` is serialized; the
/// id is always present, `null` when the request's id was unrecoverable.
#[derive(Debug, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// What a tool handler produced, before envelope wrapping.
#[derive(Debug)]
pub enum ToolOutcome {
    Text(String),
    Structured(Value),
}
