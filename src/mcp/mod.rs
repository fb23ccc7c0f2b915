pub mod dto;
pub mod handler;

pub use dto::{McpError, McpRequest, McpResponse, ToolCall, ToolOutcome, INTERNAL_ERROR};
pub use handler::{dispatch_raw, handle_request};
