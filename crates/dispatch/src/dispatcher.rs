//! Tool call dispatch: validate, plan, send, normalize.

use std::time::Duration;

use backend::{BackendRequest, DEFAULT_TIMEOUT, Transport};
use mcp::{CallToolResult, Tool, ToolHandler};
use serde_json::{Map, Value};

use crate::error::{DispatchError, Result};
use crate::outcome::Outcome;
use crate::registry::Registry;
use crate::tool::ToolDef;
use crate::validate::validate;

/// Single entry point for tool invocations.
///
/// Holds only read-only state, so one dispatcher serves any number of
/// concurrent calls.
pub struct Dispatcher<T> {
    registry: Registry,
    transport: T,
    deadline: Duration,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(registry: Registry, transport: T) -> Self {
        Self {
            registry,
            transport,
            deadline: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound on one backend call, on top of the transport's own timeout.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Resolve a call into the backend request it would make, without
    /// sending anything.
    pub fn plan(&self, name: &str, arguments: Option<Value>) -> Result<BackendRequest> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;
        let arguments = validate(tool, arguments)?;
        let request = build_request(tool, arguments);
        tracing::debug!(tool = name, %request, "planned backend request");
        Ok(request)
    }

    /// Run one tool call to completion. Never fails: every error becomes
    /// [`Outcome::Failure`].
    pub async fn invoke(&self, name: &str, arguments: Option<Value>) -> Outcome {
        match self.execute(name, arguments).await {
            Ok(payload) => Outcome::success(payload),
            Err(error) => {
                tracing::warn!(tool = name, kind = ?error.kind(), %error, "tool call failed");
                Outcome::from(error)
            }
        }
    }

    async fn execute(&self, name: &str, arguments: Option<Value>) -> Result<Value> {
        let request = self.plan(name, arguments)?;
        let response = tokio::time::timeout(self.deadline, self.transport.send(request))
            .await
            .map_err(|_| DispatchError::DeadlineExceeded(self.deadline))??;
        Ok(response)
    }
}

fn build_request(tool: &ToolDef, mut arguments: Map<String, Value>) -> BackendRequest {
    let call = &tool.call;
    let path = call.render_path(&arguments);

    for placeholder in call.placeholders().unwrap_or_default() {
        arguments.remove(placeholder);
    }

    let mut request = BackendRequest::new(call.method, path);

    if call.method.has_body() {
        let mut body = Map::new();
        let merged = call.merge.and_then(|name| arguments.remove(name));
        for param in tool.params {
            if let Some(value) = arguments.remove(param.name) {
                body.insert(param.name.to_string(), value);
            }
        }
        if let Some(Value::Object(fields)) = merged {
            for (key, value) in fields {
                body.entry(key).or_insert(value);
            }
        }
        request = request.with_body(Value::Object(body));
    } else {
        for param in tool.params {
            if let Some(value) = arguments.remove(param.name) {
                request = request.with_query(param.name, query_value(value));
            }
        }
    }

    request
}

fn query_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl<T: Transport + 'static> ToolHandler for Dispatcher<T> {
    fn list_tools(&self) -> Vec<Tool> {
        self.registry.list_tools()
    }

    async fn call_tool(&self, name: &str, arguments: Option<Value>) -> CallToolResult {
        self.invoke(name, arguments).await.into_call_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::Method;
    use serde_json::json;

    struct Unreachable;

    impl Transport for Unreachable {
        async fn send(&self, request: BackendRequest) -> backend::Result<Value> {
            panic!("unexpected request: {request}");
        }
    }

    fn dispatcher() -> Dispatcher<Unreachable> {
        Dispatcher::new(Registry::builtin().unwrap(), Unreachable)
    }

    #[test]
    fn plans_path_and_query() {
        let request = dispatcher()
            .plan(
                "radim_vitals_history",
                Some(json!({"senior_id": "s 1", "hours": 24})),
            )
            .unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/api/iot/sensors/s%201/history");
        assert_eq!(request.query, vec![("hours".to_string(), "24".to_string())]);
        assert_eq!(request.body, None);
    }

    #[test]
    fn path_arguments_not_resent() {
        let request = dispatcher()
            .plan(
                "radim_update_senior",
                Some(json!({"senior_id": "s1", "room": "12"})),
            )
            .unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/api/seniors/s1");
        assert_eq!(request.body, Some(json!({"room": "12"})));
    }

    #[test]
    fn merged_object_spread_into_body() {
        let request = dispatcher()
            .plan(
                "radim_fall_detection",
                Some(json!({
                    "senior_id": "s1",
                    "sensor_data": {"acceleration": 9.8, "senior_id": "other"}
                })),
            )
            .unwrap();
        assert_eq!(
            request.body,
            Some(json!({"senior_id": "s1", "acceleration": 9.8}))
        );
    }

    #[test]
    fn post_without_arguments_sends_defaults() {
        let request = dispatcher().plan("radim_fetch_news", None).unwrap();
        assert_eq!(request.body, Some(json!({"category": "general"})));
    }

    #[test]
    fn plan_rejects_unknown_tool() {
        let err = dispatcher().plan("radim_nope", None).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: radim_nope");
    }

    #[test]
    fn query_values_stringified() {
        assert_eq!(query_value(json!("a")), "a");
        assert_eq!(query_value(json!(2)), "2");
        assert_eq!(query_value(json!(true)), "true");
        assert_eq!(query_value(json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn handler_lists_registry() {
        let dispatcher = dispatcher();
        let tools = ToolHandler::list_tools(&dispatcher);
        assert_eq!(tools.len(), 29);
    }
}
