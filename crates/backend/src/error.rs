//! Transport error types.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Errors produced while talking to the backend.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The base URL or a request path could not be turned into a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed (bad header, TLS setup).
    #[error("client configuration error: {0}")]
    Client(String),

    /// Connection refused, DNS failure, reset, and similar.
    #[error("network error: {0}")]
    Network(String),

    /// The backend did not answer within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    ///
    /// `body` holds the parsed JSON body, or the raw text as a JSON string
    /// when the body was not JSON.
    #[error("backend returned {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        body: Option<Value>,
    },

    /// A success response whose body could not be read or decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// The most specific human-readable message the backend supplied.
    ///
    /// Only [`Status`](Self::Status) errors carry a body; see
    /// [`extract_detail`] for the lookup order.
    pub fn backend_detail(&self) -> Option<String> {
        match self {
            Self::Status {
                body: Some(body), ..
            } => extract_detail(body),
            _ => None,
        }
    }

    /// The error body returned by the backend, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// HTTP status code for [`Status`](Self::Status) errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull an error message out of a backend error body.
///
/// FastAPI routes answer with `detail`, Flask routes with `error`, a few
/// with `message`. Checked in that order. A non-string `detail` (FastAPI
/// validation errors are arrays) is rendered as compact JSON.
pub fn extract_detail(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    if let Some(detail) = object.get("detail") {
        match detail {
            Value::Null => {}
            Value::String(text) if text.trim().is_empty() => {}
            Value::String(text) => return Some(text.clone()),
            other => return Some(other.to_string()),
        }
    }

    ["error", "message"].iter().find_map(|key| {
        object
            .get(*key)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    })
}

pub type Result<T> = std::result::Result<T, TransportError>;
