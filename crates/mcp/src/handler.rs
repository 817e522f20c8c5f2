//! Tool handler trait.

use std::future::Future;

use serde_json::Value;

use crate::protocol::{CallToolResult, Tool};

/// The boundary between the protocol loop and whatever executes tools.
///
/// `call_tool` always produces a result: tool-level failures are reported
/// with [`CallToolResult::error`], never as protocol errors.
pub trait ToolHandler: Send + Sync + 'static {
    /// Tools advertised by `tools/list`.
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute one `tools/call`.
    fn call_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> impl Future<Output = CallToolResult> + Send;
}
