//! MCP (Model Context Protocol) server library.
//!
//! This crate serves tools to an MCP host over a line-delimited JSON-RPC
//! stream, usually the process's stdin/stdout.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{CallToolResult, Server, ServerInfo, Tool, ToolHandler};
//! use serde_json::{Value, json};
//!
//! struct Hello;
//!
//! impl ToolHandler for Hello {
//!     fn list_tools(&self) -> Vec<Tool> {
//!         vec![Tool {
//!             name: "hello".to_string(),
//!             description: Some("Say hello".to_string()),
//!             input_schema: json!({"type": "object", "properties": {}}),
//!         }]
//!     }
//!
//!     async fn call_tool(&self, name: &str, _arguments: Option<Value>) -> CallToolResult {
//!         match name {
//!             "hello" => CallToolResult::text("hello"),
//!             other => CallToolResult::error(format!("Unknown tool: {other}")),
//!         }
//!     }
//! }
//!
//! # async fn example() -> mcp::Result<()> {
//! let server = Server::new(ServerInfo::new("hello-mcp", "0.1.0"), Hello);
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod protocol;
mod server;

pub use error::{Error, Result};
pub use handler::ToolHandler;
pub use protocol::{
    CallToolParams, CallToolResult, ClientInfo, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    LATEST_PROTOCOL_VERSION, ListToolsResult, METHOD_NOT_FOUND, PARSE_ERROR, RequestId,
    SUPPORTED_PROTOCOL_VERSIONS, ServerCapabilities, ServerInfo, Tool, ToolContent,
    ToolsCapability,
};
pub use server::{MAX_MESSAGE_SIZE, Server};
