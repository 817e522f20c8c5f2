//! The immutable set of tools served by a dispatcher.

use std::collections::HashMap;

use crate::catalog::CATALOG;
use crate::error::RegistryError;
use crate::schema::ParamKind;
use crate::tool::ToolDef;

/// Read-only tool table, validated once at construction.
#[derive(Debug, Clone)]
pub struct Registry {
    tools: Vec<ToolDef>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// Build a registry, rejecting tables whose entries are inconsistent.
    pub fn new(tools: Vec<ToolDef>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(tools.len());
        for (position, tool) in tools.iter().enumerate() {
            check_tool(tool)?;
            if index.insert(tool.name, position).is_some() {
                return Err(RegistryError::DuplicateTool(tool.name));
            }
        }
        Ok(Self { tools, index })
    }

    /// The Radim Brain tool table.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(CATALOG.to_vec())
    }

    /// All tools, in table order.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The registry as `tools/list` entries.
    pub fn list_tools(&self) -> Vec<mcp::Tool> {
        self.tools.iter().map(ToolDef::to_tool).collect()
    }
}

fn check_tool(tool: &ToolDef) -> Result<(), RegistryError> {
    let call = &tool.call;

    let placeholders = call.placeholders().ok_or(RegistryError::MalformedPath {
        tool: tool.name,
        path: call.path,
    })?;
    for placeholder in placeholders {
        let param = tool
            .param(placeholder)
            .ok_or_else(|| RegistryError::UndeclaredPlaceholder {
                tool: tool.name,
                placeholder: placeholder.to_string(),
            })?;
        if !param.required || param.kind != ParamKind::String {
            return Err(RegistryError::PathParamNotRequiredString {
                tool: tool.name,
                param: param.name,
            });
        }
    }

    if let Some(merge) = call.merge {
        match tool.param(merge) {
            Some(param) if param.kind == ParamKind::Object => {}
            _ => {
                return Err(RegistryError::InvalidMerge {
                    tool: tool.name,
                    param: merge,
                });
            }
        }
    }

    for &(name, _) in call.defaults {
        if tool.param(name).is_none() {
            return Err(RegistryError::UndeclaredDefault {
                tool: tool.name,
                param: name,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Param;
    use crate::tool::CallSpec;

    fn tool(name: &'static str, params: &'static [Param], call: CallSpec) -> ToolDef {
        ToolDef {
            name,
            description: "test tool",
            params,
            call,
        }
    }

    const ID: &[Param] = &[Param::string("id", "id").required()];

    #[test]
    fn builtin_table_is_valid() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.len(), 29);
        assert!(registry.get("radim_health_check").is_some());
        assert!(registry.get("health_check").is_none());
        assert!(registry.tools().iter().all(|t| t.name.starts_with("radim_")));
    }

    #[test]
    fn list_tools_keeps_order() {
        let registry = Registry::builtin().unwrap();
        let tools = registry.list_tools();
        assert_eq!(tools.len(), registry.len());
        assert_eq!(tools[0].name, "radim_health_check");
        assert_eq!(tools[28].name, "radim_synthesize_voice");
    }

    #[test]
    fn rejects_duplicates() {
        let err = Registry::new(vec![
            tool("a", &[], CallSpec::get("/a")),
            tool("a", &[], CallSpec::get("/b")),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("a"));
    }

    #[test]
    fn rejects_undeclared_placeholder() {
        let err = Registry::new(vec![tool("a", &[], CallSpec::get("/a/{id}"))]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::UndeclaredPlaceholder {
                tool: "a",
                placeholder: "id".into()
            }
        );
    }

    #[test]
    fn rejects_optional_path_param() {
        const OPTIONAL: &[Param] = &[Param::string("id", "id")];
        let err = Registry::new(vec![tool("a", OPTIONAL, CallSpec::get("/a/{id}"))]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::PathParamNotRequiredString {
                tool: "a",
                param: "id"
            }
        );
    }

    #[test]
    fn rejects_malformed_path() {
        let err = Registry::new(vec![tool("a", ID, CallSpec::get("/a/{id"))]).unwrap_err();
        assert!(matches!(err, RegistryError::MalformedPath { tool: "a", .. }));
    }

    #[test]
    fn rejects_bad_merge_and_default() {
        let err = Registry::new(vec![tool("a", ID, CallSpec::post("/a").merge("id"))]).unwrap_err();
        assert_eq!(err, RegistryError::InvalidMerge { tool: "a", param: "id" });

        let err = Registry::new(vec![tool(
            "a",
            ID,
            CallSpec::post("/a").defaults(&[("user_id", "x")]),
        )])
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::UndeclaredDefault {
                tool: "a",
                param: "user_id"
            }
        );
    }
}
