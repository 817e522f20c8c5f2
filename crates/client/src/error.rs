use backend::TransportError;
use thiserror::Error;

/// Errors returned by the SDK.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered, but not in the expected shape.
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// The backend's own error message, for failure statuses that carry one.
    pub fn backend_detail(&self) -> Option<String> {
        match self {
            Self::Transport(e) => e.backend_detail(),
            Self::Decode { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
