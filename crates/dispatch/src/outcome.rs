//! Result envelope of one invocation.

use mcp::CallToolResult;
use serde::Serialize;
use serde_json::Value;

use crate::error::DispatchError;

/// What a caller gets back from every invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The backend's response body, untouched.
    Success { payload: Value },
    Failure {
        message: String,
        /// The backend's error body, when it sent one.
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<Value>,
    },
}

impl Outcome {
    pub fn success(payload: Value) -> Self {
        Self::Success { payload }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            detail: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Text form shown to the caller.
    ///
    /// Success renders the payload as pretty JSON. Failure renders
    /// `Error: <message>`, followed by the pretty detail on the next line.
    pub fn render(&self) -> String {
        match self {
            Self::Success { payload } => pretty(payload),
            Self::Failure {
                message,
                detail: None,
            } => format!("Error: {message}"),
            Self::Failure {
                message,
                detail: Some(detail),
            } => format!("Error: {message}\n{}", pretty(detail)),
        }
    }

    pub fn into_call_result(self) -> CallToolResult {
        let text = self.render();
        if self.is_success() {
            CallToolResult::text(text)
        } else {
            CallToolResult::error(text)
        }
    }
}

impl From<DispatchError> for Outcome {
    fn from(error: DispatchError) -> Self {
        let detail = match &error {
            DispatchError::Transport(e) => e.body().cloned(),
            _ => None,
        };
        Self::Failure {
            message: error.message(),
            detail,
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
