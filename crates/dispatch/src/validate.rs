//! Argument validation against a tool's declared parameters.

use serde_json::{Map, Value};

use crate::error::{DispatchError, Result};
use crate::tool::ToolDef;

/// Check `arguments` against `tool` and return the declared arguments only.
///
/// `None` reads as an empty object. `null` values count as absent. Defaults
/// are filled in before required parameters are checked.
pub fn validate(tool: &ToolDef, arguments: Option<Value>) -> Result<Map<String, Value>> {
    let supplied = match arguments {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(DispatchError::ArgumentsNotObject {
                tool: tool.name.to_string(),
            });
        }
    };

    let mut accepted = Map::new();
    for (name, value) in supplied {
        if value.is_null() {
            continue;
        }
        if tool.param(&name).is_none() {
            tracing::debug!(tool = tool.name, argument = %name, "dropping undeclared argument");
            continue;
        }
        accepted.insert(name, value);
    }

    for &(name, default) in tool.call.defaults {
        accepted
            .entry(name)
            .or_insert_with(|| Value::String(default.to_string()));
    }

    for param in tool.params {
        match accepted.get(param.name) {
            None if param.required => {
                return Err(DispatchError::MissingArgument {
                    tool: tool.name.to_string(),
                    param: param.name,
                });
            }
            None => {}
            Some(value) => {
                param
                    .kind
                    .check(value)
                    .map_err(|reason| DispatchError::InvalidArgument {
                        tool: tool.name.to_string(),
                        param: param.name,
                        reason,
                    })?;
            }
        }
    }

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Param;
    use crate::tool::CallSpec;
    use serde_json::json;

    const CHAT: ToolDef = ToolDef {
        name: "chat",
        description: "chat",
        params: &[
            Param::string("message", "message").required(),
            Param::string("user_id", "user"),
            Param::number("temperature", "temperature"),
        ],
        call: CallSpec::post("/chat").defaults(&[("user_id", "claude-desktop")]),
    };

    #[test]
    fn absent_bag_is_empty_object() {
        let err = validate(&CHAT, None).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::MissingArgument {
                param: "message",
                ..
            }
        ));
    }

    #[test]
    fn non_object_bag_rejected() {
        let err = validate(&CHAT, Some(json!(["hi"]))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments for chat: expected a JSON object");
    }

    #[test]
    fn default_injected_only_when_absent() {
        let args = validate(&CHAT, Some(json!({"message": "hi"}))).unwrap();
        assert_eq!(args["user_id"], "claude-desktop");

        let args = validate(&CHAT, Some(json!({"message": "hi", "user_id": "u1"}))).unwrap();
        assert_eq!(args["user_id"], "u1");

        let args = validate(&CHAT, Some(json!({"message": "hi", "user_id": null}))).unwrap();
        assert_eq!(args["user_id"], "claude-desktop");
    }

    #[test]
    fn null_required_counts_as_missing() {
        let err = validate(&CHAT, Some(json!({"message": null}))).unwrap_err();
        assert!(matches!(err, DispatchError::MissingArgument { .. }));
    }

    #[test]
    fn undeclared_arguments_dropped() {
        let args = validate(&CHAT, Some(json!({"message": "hi", "admin": true}))).unwrap();
        assert!(!args.contains_key("admin"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn optional_arguments_type_checked() {
        let err = validate(
            &CHAT,
            Some(json!({"message": "hi", "temperature": "warm"})),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument 'temperature' for chat: expected number, got string"
        );
    }
}
