//! Response schemas derived from a function's return type.

use crate::{Error, Result};
use llm::ResponseFormat;
use schemars::JsonSchema;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

const WRAPPER_NAME: &str = "Response";
const WRAPPER_FIELD: &str = "response";

/// The schema sent to the model, and how to turn its reply back into the
/// declared return type.
///
/// A return type whose schema is an object with named properties is used
/// as is. Any other type is wrapped in a one-field object `{"response": T}`
/// and the field is extracted again after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    format: ResponseFormat,
    wrapped: bool,
}

impl ResponseSchema {
    /// Derive the response schema for `T`.
    pub fn of<T: JsonSchema>() -> Result<Self> {
        let schema = serde_json::to_value(schemars::schema_for!(T))
            .map_err(|e| Error::InvalidSchema(e.to_string()))?;
        Self::from_schema(schema)
    }

    fn from_schema(mut schema: Value) -> Result<Self> {
        let Some(root) = schema.as_object_mut() else {
            return Err(Error::InvalidSchema("expected a schema object".into()));
        };
        root.remove("$schema");

        if is_structural(root) {
            let name = root
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(WRAPPER_NAME)
                .to_string();
            strictify(&mut schema);
            return Ok(Self {
                format: ResponseFormat::new(&name, schema),
                wrapped: false,
            });
        }

        let mut wrapper = Map::new();
        for key in ["$defs", "definitions"] {
            if let Some(defs) = root.remove(key) {
                wrapper.insert(key.to_string(), defs);
            }
        }
        root.remove("title");

        wrapper.insert("type".into(), "object".into());
        wrapper.insert(
            "properties".into(),
            Value::Object(Map::from_iter([(WRAPPER_FIELD.to_string(), schema)])),
        );
        let mut schema = Value::Object(wrapper);
        strictify(&mut schema);

        Ok(Self {
            format: ResponseFormat::new(WRAPPER_NAME, schema),
            wrapped: true,
        })
    }

    /// Whether replies are unwrapped from a `response` field.
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    pub fn format(&self) -> &ResponseFormat {
        &self.format
    }

    /// Convert a parsed reply into the declared return type.
    pub fn extract<T: DeserializeOwned>(&self, value: Value) -> serde_json::Result<T> {
        let value = if self.wrapped {
            match value {
                Value::Object(mut fields) => fields.remove(WRAPPER_FIELD).ok_or_else(|| {
                    serde_json::Error::custom(format!("missing field `{WRAPPER_FIELD}`"))
                })?,
                other => {
                    return Err(serde_json::Error::custom(format!(
                        "expected an object with a `{WRAPPER_FIELD}` field, got {other}"
                    )));
                }
            }
        } else {
            value
        };
        serde_json::from_value(value)
    }
}

// An object schema declaring at least one named field.
fn is_structural(root: &Map<String, Value>) -> bool {
    root.get("type").and_then(Value::as_str) == Some("object")
        && root
            .get("properties")
            .and_then(Value::as_object)
            .is_some_and(|props| !props.is_empty())
}

/// Tighten a schema for strict structured outputs: closed objects with
/// every property required, and no numeric `format` hints.
fn strictify(schema: &mut Value) {
    let Some(node) = schema.as_object_mut() else {
        return;
    };

    let is_numeric = |t: &Value| matches!(t.as_str(), Some("integer" | "number"));
    let numeric = match node.get("type") {
        Some(Value::Array(types)) => types.iter().any(is_numeric),
        Some(t) => is_numeric(t),
        None => false,
    };
    if numeric {
        node.remove("format");
    }

    if let Some(Value::Object(props)) = node.get_mut("properties") {
        let required: Vec<Value> = props.keys().cloned().map(Value::String).collect();
        props.values_mut().for_each(strictify);
        node.insert("required".into(), Value::Array(required));
        node.insert("additionalProperties".into(), Value::Bool(false));
    }

    for key in ["$defs", "definitions"] {
        if let Some(Value::Object(defs)) = node.get_mut(key) {
            defs.values_mut().for_each(strictify);
        }
    }
    for key in ["anyOf", "oneOf", "allOf", "prefixItems"] {
        if let Some(Value::Array(items)) = node.get_mut(key) {
            items.iter_mut().for_each(strictify);
        }
    }
    for key in ["items", "additionalProperties"] {
        if let Some(sub) = node.get_mut(key) {
            strictify(sub);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Deserialize, JsonSchema)]
    struct Diagnosis {
        risk: String,
        score: Option<u8>,
    }

    #[derive(Debug, PartialEq, Deserialize, JsonSchema)]
    struct Step {
        action: String,
    }

    #[test]
    fn scalar_is_wrapped_and_round_trips() {
        let schema = ResponseSchema::of::<String>().unwrap();
        assert!(schema.is_wrapped());
        assert_eq!(schema.format().name, "Response");
        assert_eq!(
            schema.format().schema,
            json!({
                "type": "object",
                "properties": {"response": {"type": "string"}},
                "required": ["response"],
                "additionalProperties": false
            })
        );

        let value: String = schema.extract(json!({"response": "1992-12-09"})).unwrap();
        assert_eq!(value, "1992-12-09");
    }

    #[test]
    fn integer_format_hint_is_removed() {
        let schema = ResponseSchema::of::<i64>().unwrap();
        assert_eq!(
            schema.format().schema["properties"]["response"],
            json!({"type": "integer"})
        );
        assert_eq!(schema.extract::<i64>(json!({"response": 42})).unwrap(), 42);
    }

    #[test]
    fn struct_is_used_unchanged() {
        let schema = ResponseSchema::of::<Diagnosis>().unwrap();
        assert!(!schema.is_wrapped());
        assert_eq!(schema.format().name, "Diagnosis");

        let root = &schema.format().schema;
        assert_eq!(root["additionalProperties"], json!(false));
        assert_eq!(root["required"], json!(["risk", "score"]));

        let value: Diagnosis = schema
            .extract(json!({"risk": "low", "score": null}))
            .unwrap();
        assert_eq!(
            value,
            Diagnosis {
                risk: "low".into(),
                score: None
            }
        );
    }

    #[test]
    fn wrapped_collection_keeps_definitions_at_root() {
        let schema = ResponseSchema::of::<Vec<Step>>().unwrap();
        assert!(schema.is_wrapped());

        let root = schema.format().schema.as_object().unwrap();
        let defs = root
            .get("$defs")
            .or_else(|| root.get("definitions"))
            .and_then(Value::as_object)
            .unwrap();
        assert_eq!(defs["Step"]["additionalProperties"], json!(false));
        assert_eq!(root["properties"]["response"]["type"], json!("array"));

        let steps: Vec<Step> = schema
            .extract(json!({"response": [{"action": "boil"}, {"action": "serve"}]}))
            .unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].action, "serve");
    }

    #[test]
    fn map_without_named_fields_is_wrapped() {
        let schema = ResponseSchema::of::<HashMap<String, u32>>().unwrap();
        assert!(schema.is_wrapped());
    }

    #[test]
    fn extract_rejects_missing_wrapper_field() {
        let schema = ResponseSchema::of::<String>().unwrap();
        assert!(schema.extract::<String>(json!({"answer": "x"})).is_err());
        assert!(schema.extract::<String>(json!("bare")).is_err());
    }

    #[test]
    fn extract_rejects_wrong_type() {
        let schema = ResponseSchema::of::<Diagnosis>().unwrap();
        assert!(schema.extract::<Diagnosis>(json!({"risk": 3})).is_err());
    }
}
