use std::time::Duration;

use backend::TransportError;
use serde::Serialize;
use thiserror::Error;

/// Errors produced while dispatching one tool call.
///
/// None of these escape [`Dispatcher::invoke`](crate::Dispatcher::invoke);
/// they are folded into [`Outcome::Failure`](crate::Outcome::Failure).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: expected a JSON object")]
    ArgumentsNotObject { tool: String },

    #[error("Missing required argument '{param}' for {tool}")]
    MissingArgument { tool: String, param: &'static str },

    #[error("Invalid argument '{param}' for {tool}: {reason}")]
    InvalidArgument {
        tool: String,
        param: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Request timed out after {0:?}")]
    DeadlineExceeded(Duration),
}

/// Which side of the adapter a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown tool or bad arguments; nothing was sent.
    LocalValidation,
    /// The backend could not be reached in time.
    Transport,
    /// The backend answered with a failure status.
    Backend,
    /// Nothing more specific is known.
    Unknown,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTool(_)
            | Self::ArgumentsNotObject { .. }
            | Self::MissingArgument { .. }
            | Self::InvalidArgument { .. } => ErrorKind::LocalValidation,
            Self::DeadlineExceeded(_) => ErrorKind::Transport,
            Self::Transport(e) if e.status().is_some() => ErrorKind::Backend,
            Self::Transport(TransportError::InvalidResponse(_)) => ErrorKind::Unknown,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Whether the failure happened before any request was sent.
    pub fn is_local(&self) -> bool {
        self.kind() == ErrorKind::LocalValidation
    }

    /// The caller-facing message.
    ///
    /// A message supplied by the backend beats the transport's own
    /// description; a transport failure with no description becomes
    /// "Unknown error".
    pub fn message(&self) -> String {
        if let Self::Transport(e) = self {
            if let Some(detail) = e.backend_detail() {
                return detail;
            }
            if transport_reason(e).is_some_and(|reason| reason.trim().is_empty()) {
                return "Unknown error".to_string();
            }
        }
        self.to_string()
    }
}

/// The free-text part of a transport error, for variants that have one.
fn transport_reason(error: &TransportError) -> Option<&str> {
    match error {
        TransportError::InvalidUrl(reason)
        | TransportError::Client(reason)
        | TransportError::Network(reason)
        | TransportError::InvalidResponse(reason) => Some(reason),
        _ => None,
    }
}

/// Problems in a tool table, found when a [`Registry`](crate::Registry) is built.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("duplicate tool name: {0}")]
    DuplicateTool(&'static str),

    #[error("{tool}: malformed path template {path:?}")]
    MalformedPath {
        tool: &'static str,
        path: &'static str,
    },

    #[error("{tool}: path placeholder {{{placeholder}}} is not a declared parameter")]
    UndeclaredPlaceholder {
        tool: &'static str,
        placeholder: String,
    },

    #[error("{tool}: path parameter '{param}' must be a required string")]
    PathParamNotRequiredString {
        tool: &'static str,
        param: &'static str,
    },

    #[error("{tool}: merged parameter '{param}' must be a declared object")]
    InvalidMerge {
        tool: &'static str,
        param: &'static str,
    },

    #[error("{tool}: default for undeclared parameter '{param}'")]
    UndeclaredDefault {
        tool: &'static str,
        param: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn local_errors_name_the_field() {
        let err = DispatchError::MissingArgument {
            tool: "radim_get_senior".into(),
            param: "senior_id",
        };
        assert_eq!(err.kind(), ErrorKind::LocalValidation);
        assert!(err.is_local());
        assert_eq!(
            err.message(),
            "Missing required argument 'senior_id' for radim_get_senior"
        );
    }

    #[test]
    fn backend_detail_wins() {
        let err = DispatchError::from(TransportError::Status {
            status: 404,
            reason: "Not Found".into(),
            body: Some(json!({"detail": "Senior not found"})),
        });
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert_eq!(err.message(), "Senior not found");
    }

    #[test]
    fn status_without_detail_uses_transport_text() {
        let err = DispatchError::from(TransportError::Status {
            status: 502,
            reason: "Bad Gateway".into(),
            body: Some(json!("upstream down")),
        });
        assert_eq!(err.message(), "backend returned 502 Bad Gateway");
    }

    #[test]
    fn network_and_deadline_are_transport_kind() {
        let err = DispatchError::from(TransportError::Network("connection refused".into()));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), "network error: connection refused");

        let err = DispatchError::DeadlineExceeded(Duration::from_secs(30));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), "Request timed out after 30s");
    }

    #[test]
    fn blank_transport_reason_is_unknown_error() {
        let err = DispatchError::from(TransportError::Network(String::new()));
        assert_eq!(err.message(), "Unknown error");

        let err = DispatchError::from(TransportError::InvalidResponse("  ".into()));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.message(), "Unknown error");
    }
}
