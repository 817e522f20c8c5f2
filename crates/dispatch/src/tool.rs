//! Tool definitions: what a tool accepts and which backend call it makes.

use backend::{Method, encode_segment};
use mcp::Tool;
use serde_json::{Map, Value};

use crate::schema::{Param, input_schema};

/// How one tool maps onto one backend request.
///
/// Arguments bound by `{placeholders}` in `path` are consumed there. The
/// rest go into the query string for GET/DELETE and into a JSON body for
/// POST/PUT. When `merge` names an object parameter, its fields are spread
/// into the body instead of nested under its name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallSpec {
    pub method: Method,
    pub path: &'static str,
    pub merge: Option<&'static str>,
    /// Values injected when the caller leaves an optional argument out.
    pub defaults: &'static [(&'static str, &'static str)],
}

impl CallSpec {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            merge: None,
            defaults: &[],
        }
    }

    pub const fn get(path: &'static str) -> Self {
        Self::new(Method::Get, path)
    }

    pub const fn post(path: &'static str) -> Self {
        Self::new(Method::Post, path)
    }

    pub const fn put(path: &'static str) -> Self {
        Self::new(Method::Put, path)
    }

    pub const fn merge(mut self, param: &'static str) -> Self {
        self.merge = Some(param);
        self
    }

    pub const fn defaults(mut self, defaults: &'static [(&'static str, &'static str)]) -> Self {
        self.defaults = defaults;
        self
    }

    /// Placeholder names in `path`, in order.
    ///
    /// Returns `None` when braces are unbalanced or a placeholder is empty.
    pub fn placeholders(&self) -> Option<Vec<&'static str>> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find(['{', '}']) {
            if rest[start..].starts_with('}') {
                return None;
            }
            let after = &rest[start + 1..];
            let end = after.find('}')?;
            let name = &after[..end];
            if name.is_empty() || name.contains('{') {
                return None;
            }
            names.push(name);
            rest = &after[end + 1..];
        }
        Some(names)
    }

    /// Substitute placeholders with percent-encoded argument values.
    ///
    /// Only called after validation, so every placeholder has a string.
    pub(crate) fn render_path(&self, arguments: &Map<String, Value>) -> String {
        let mut path = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                path.push_str(&rest[start..]);
                return path;
            };
            let value = arguments
                .get(&after[..end])
                .and_then(Value::as_str)
                .unwrap_or_default();
            path.push_str(&encode_segment(value));
            rest = &after[end + 1..];
        }
        path.push_str(rest);
        path
    }
}

/// A tool exposed to callers plus its backend mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [Param],
    pub call: CallSpec,
}

impl ToolDef {
    pub fn param(&self, name: &str) -> Option<&'static Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn input_schema(&self) -> Value {
        input_schema(self.params)
    }

    /// The `tools/list` entry for this tool.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            input_schema: self.input_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholders_in_order() {
        let call = CallSpec::get("/api/iot/sensors/{senior_id}/history");
        assert_eq!(call.placeholders(), Some(vec!["senior_id"]));

        let call = CallSpec::get("/a/{x}/b/{y}");
        assert_eq!(call.placeholders(), Some(vec!["x", "y"]));

        assert_eq!(CallSpec::get("/health").placeholders(), Some(vec![]));
    }

    #[test]
    fn malformed_templates() {
        assert_eq!(CallSpec::get("/a/{x").placeholders(), None);
        assert_eq!(CallSpec::get("/a/x}").placeholders(), None);
        assert_eq!(CallSpec::get("/a/{}").placeholders(), None);
        assert_eq!(CallSpec::get("/a/{{x}}").placeholders(), None);
    }

    #[test]
    fn render_encodes_segments() {
        let call = CallSpec::get("/kal/library/books/{book_id}");
        let args = json!({"book_id": "a b/c"});
        let path = call.render_path(args.as_object().unwrap());
        assert_eq!(path, "/kal/library/books/a%20b%2Fc");
    }

    #[test]
    fn tool_entry_shape() {
        const PARAMS: &[Param] = &[Param::string("book_id", "Book id").required()];
        let def = ToolDef {
            name: "radim_get_book",
            description: "Get one book",
            params: PARAMS,
            call: CallSpec::get("/kal/library/books/{book_id}"),
        };
        let tool = def.to_tool();
        assert_eq!(tool.name, "radim_get_book");
        assert_eq!(tool.input_schema["required"], json!(["book_id"]));
        assert!(def.param("book_id").is_some());
        assert!(def.param("other").is_none());
    }
}
