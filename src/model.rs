//! Schema-backed request/response models.
//!
//! Every structured body a route consumes or produces implements [`Model`]:
//! a serde type plus a JSON Schema describing its field set. Validation runs
//! the schema against a parsed value and reports every field failure instead
//! of stopping at the first one.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A typed model with a JSON Schema describing its fields.
pub trait Model: Serialize + DeserializeOwned {
    /// Model name as used in validation round-trips and error messages.
    fn name() -> &'static str;

    /// JSON Schema for the model's field set (`properties` / `required`).
    fn schema() -> Value;
}

/// Runtime reference to a model: its name and compiled-on-demand schema.
///
/// Routes carry `ModelSpec`s for their request body and response class so the
/// validation engine and response normalizer can work without generics.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub name: String,
    pub schema: Value,
}

impl ModelSpec {
    /// Build the spec for a [`Model`] implementation.
    #[must_use]
    pub fn of<M: Model>() -> Self {
        Self {
            name: M::name().to_string(),
            schema: M::schema(),
        }
    }

    /// Validate `instance` against the model's field set.
    ///
    /// Collects one message per failing field rather than failing fast:
    /// type mismatches yield `"Wrong type received at: F. Expected: T"`,
    /// missing required fields yield `"Value not found at: F"`, and anything
    /// else yields `"Unknown error: {detail}"`.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<String>> {
        let validator = match jsonschema::validator_for(&self.schema) {
            Ok(v) => v,
            Err(e) => return Err(vec![format!("Unknown error: {e}")]),
        };
        let errors: Vec<String> = validator.iter_errors(instance).map(classify_error).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate `instance` and return it with unknown fields dropped.
    ///
    /// Fields present in the instance but absent from the schema's
    /// `properties` are removed; schema enforcement is strict and the result
    /// carries exactly the model's field set.
    pub fn coerce(&self, instance: &Value) -> Result<Value, Vec<String>> {
        self.validate(instance)?;
        let mut value = instance.clone();
        if let (Some(obj), Some(props)) = (
            value.as_object_mut(),
            self.schema.get("properties").and_then(Value::as_object),
        ) {
            obj.retain(|key, _| props.contains_key(key));
        }
        Ok(value)
    }
}

/// Map a schema violation to its user-facing message.
fn classify_error(error: ValidationError<'_>) -> String {
    let field = || {
        let path = error.instance_path.to_string();
        path.rsplit('/').next().unwrap_or_default().to_string()
    };
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property.as_str().map(str::to_string).unwrap_or_else(|| property.to_string());
            format!("Value not found at: {name}")
        }
        ValidationErrorKind::Type { kind } => {
            let expected = match kind {
                TypeKind::Single(t) => t.to_string(),
                TypeKind::Multiple(types) => {
                    let names: Vec<String> = types.iter().map(|t| t.to_string()).collect();
                    names.join(", ")
                }
            };
            format!("Wrong type received at: {}. Expected: {expected}", field())
        }
        _ => format!("Unknown error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Example {
        a: i64,
        b: String,
    }

    impl Model for Example {
        fn name() -> &'static str {
            "Example"
        }

        fn schema() -> Value {
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "integer"},
                    "b": {"type": "string"},
                },
                "required": ["a", "b"],
            })
        }
    }

    #[test]
    fn test_validate_ok() {
        let spec = ModelSpec::of::<Example>();
        assert!(spec.validate(&json!({"a": 1, "b": "x"})).is_ok());
    }

    #[test]
    fn test_validate_reports_wrong_type() {
        let spec = ModelSpec::of::<Example>();
        let errors = spec.validate(&json!({"a": "str", "b": "x"})).unwrap_err();
        assert_eq!(errors, vec!["Wrong type received at: a. Expected: integer"]);
    }

    #[test]
    fn test_validate_reports_missing_field() {
        let spec = ModelSpec::of::<Example>();
        let errors = spec.validate(&json!({"b": "x"})).unwrap_err();
        assert_eq!(errors, vec!["Value not found at: a"]);
    }

    #[test]
    fn test_validate_collects_all_field_errors() {
        let spec = ModelSpec::of::<Example>();
        let errors = spec.validate(&json!({"a": "str"})).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_coerce_drops_unknown_fields() {
        let spec = ModelSpec::of::<Example>();
        let coerced = spec.coerce(&json!({"a": 1, "b": "x", "extra": true})).unwrap();
        assert_eq!(coerced, json!({"a": 1, "b": "x"}));
    }
}
