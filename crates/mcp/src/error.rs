//! MCP server error types.

use thiserror::Error;

/// Errors that end the server loop.
///
/// Per-request problems (bad JSON, unknown methods, failing tools) are
/// answered on the wire and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
