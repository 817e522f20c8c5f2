//! Declared tool parameters and their JSON Schema rendering.

use serde_json::{Map, Value, json};

/// The accepted shape of one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    String,
    Number,
    /// A number within an inclusive range.
    Range { min: f64, max: f64 },
    Object,
    Array,
    /// One of a fixed set of string literals.
    OneOf(&'static [&'static str]),
}

impl ParamKind {
    /// JSON Schema `type` for this kind.
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String | Self::OneOf(_) => "string",
            Self::Number | Self::Range { .. } => "number",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Check a value against this kind, describing the mismatch.
    pub fn check(self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (Self::String, Value::String(_)) => Ok(()),
            (Self::Number, Value::Number(_)) => Ok(()),
            (Self::Range { min, max }, Value::Number(n)) => match n.as_f64() {
                Some(v) if (min..=max).contains(&v) => Ok(()),
                _ => Err(format!("expected a number between {min} and {max}, got {n}")),
            },
            (Self::Object, Value::Object(_)) => Ok(()),
            (Self::Array, Value::Array(_)) => Ok(()),
            (Self::OneOf(allowed), Value::String(s)) if allowed.contains(&s.as_str()) => Ok(()),
            (Self::OneOf(allowed), _) => Err(format!(
                "expected one of {}, got {value}",
                allowed.join(", ")
            )),
            (kind, other) => Err(format!(
                "expected {}, got {}",
                kind.json_type(),
                type_name(other)
            )),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declared argument of a tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
}

impl Param {
    pub const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Number, description)
    }

    pub const fn range(name: &'static str, min: f64, max: f64, description: &'static str) -> Self {
        Self::new(name, ParamKind::Range { min, max }, description)
    }

    pub const fn object(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Object, description)
    }

    pub const fn array(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Array, description)
    }

    pub const fn one_of(
        name: &'static str,
        allowed: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self::new(name, ParamKind::OneOf(allowed), description)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// JSON Schema for this property.
    pub fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.kind.json_type()));
        schema.insert("description".into(), json!(self.description));
        match self.kind {
            ParamKind::Range { min, max } => {
                schema.insert("minimum".into(), json!(min));
                schema.insert("maximum".into(), json!(max));
            }
            ParamKind::OneOf(allowed) => {
                schema.insert("enum".into(), json!(allowed));
            }
            _ => {}
        }
        Value::Object(schema)
    }
}

/// JSON Schema object describing a full parameter list.
pub fn input_schema(params: &[Param]) -> Value {
    let properties: Map<String, Value> = params
        .iter()
        .map(|p| (p.name.to_string(), p.schema()))
        .collect();

    let required: Vec<&str> = params.iter().filter(|p| p.required).map(|p| p.name).collect();

    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_required_params() {
        let params = [
            Param::string("senior_id", "Senior id").required(),
            Param::number("hours", "Window in hours"),
        ];
        let schema = input_schema(&params);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["hours"]["type"], "number");
        assert_eq!(schema["required"], json!(["senior_id"]));
    }

    #[test]
    fn schema_omits_empty_required() {
        let schema = input_schema(&[]);
        assert_eq!(schema, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn range_and_enum_constraints_render() {
        let age = Param::range("age", 50.0, 120.0, "Age").schema();
        assert_eq!(age["minimum"], 50.0);
        assert_eq!(age["maximum"], 120.0);

        let level = Param::one_of("difficulty", &["easy", "medium", "hard"], "Level").schema();
        assert_eq!(level["type"], "string");
        assert_eq!(level["enum"], json!(["easy", "medium", "hard"]));
    }

    #[test]
    fn kind_checks() {
        assert!(ParamKind::String.check(&json!("x")).is_ok());
        assert!(ParamKind::String.check(&json!(1)).is_err());
        assert!(ParamKind::Number.check(&json!(2.5)).is_ok());
        assert!(ParamKind::Object.check(&json!([])).is_err());
        assert!(ParamKind::Array.check(&json!([1])).is_ok());

        let age = ParamKind::Range {
            min: 50.0,
            max: 120.0,
        };
        assert!(age.check(&json!(50)).is_ok());
        assert!(age.check(&json!(120)).is_ok());
        let err = age.check(&json!(49)).unwrap_err();
        assert!(err.contains("between 50 and 120"), "{err}");
        assert!(age.check(&json!("80")).is_err());

        let level = ParamKind::OneOf(&["easy", "hard"]);
        assert!(level.check(&json!("easy")).is_ok());
        let err = level.check(&json!("extreme")).unwrap_err();
        assert_eq!(err, "expected one of easy, hard, got \"extreme\"");
    }
}
