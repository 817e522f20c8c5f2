#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use backend::{BackendRequest, Transport, TransportError};
use dispatch::{ParamKind, ToolDef};
use serde_json::{Map, Value, json};

/// Records every request and answers with a fixed body.
pub struct Recording {
    requests: Mutex<Vec<BackendRequest>>,
    reply: Value,
}

impl Recording {
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply,
        })
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for Recording {
    async fn send(&self, request: BackendRequest) -> backend::Result<Value> {
        self.requests.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }
}

/// Answers every request with a non-success status and body.
pub struct Failing {
    pub status: u16,
    pub body: Value,
}

impl Transport for Failing {
    async fn send(&self, _request: BackendRequest) -> backend::Result<Value> {
        Err(TransportError::Status {
            status: self.status,
            reason: "Error".to_string(),
            body: Some(self.body.clone()),
        })
    }
}

/// Never answers.
pub struct Hanging;

impl Transport for Hanging {
    async fn send(&self, _request: BackendRequest) -> backend::Result<Value> {
        std::future::pending().await
    }
}

/// Answers with the request path after a delay.
pub struct Delayed(pub Duration);

impl Transport for Delayed {
    async fn send(&self, request: BackendRequest) -> backend::Result<Value> {
        tokio::time::sleep(self.0).await;
        Ok(json!({"path": request.path, "query": request.query}))
    }
}

pub fn sample_value(kind: ParamKind) -> Value {
    match kind {
        ParamKind::String => json!("v"),
        ParamKind::Number => json!(3),
        ParamKind::Range { min, .. } => json!(min),
        ParamKind::Object => json!({"reading": 1}),
        ParamKind::Array => json!(["a"]),
        ParamKind::OneOf(allowed) => json!(allowed[0]),
    }
}

/// Arguments satisfying `tool`, optionally including every optional parameter.
pub fn sample_arguments(tool: &ToolDef, include_optional: bool) -> Value {
    let arguments: Map<String, Value> = tool
        .params
        .iter()
        .filter(|p| p.required || include_optional)
        .map(|p| (p.name.to_string(), sample_value(p.kind)))
        .collect();
    Value::Object(arguments)
}
