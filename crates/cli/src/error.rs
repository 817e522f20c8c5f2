//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors. Any of them ends the process with exit code 1.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `--args` was not valid JSON.
    #[error("invalid --args: {0}")]
    Arguments(#[from] serde_json::Error),

    /// The tool table failed its startup checks.
    #[error(transparent)]
    Registry(#[from] dispatch::RegistryError),

    #[error(transparent)]
    Transport(#[from] backend::TransportError),

    #[error(transparent)]
    Server(#[from] mcp::Error),

    /// `call` finished with a failure outcome; already printed.
    #[error("tool call failed")]
    ToolFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
