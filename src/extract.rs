//! Validation/coercion engine.
//!
//! Converts the raw string maps of an inbound event into typed values
//! according to a handler contract. Extraction is total: it never fails
//! fast, every failure becomes an accumulated error string, and each
//! descriptor contributes either one value or at least one error.

use crate::contract::ParamSchema;
use crate::event::{Event, LambdaContext};
use crate::model::ModelSpec;
use crate::typing::ScalarType;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(Uuid),
    /// Declared optional and absent from the event.
    Null,
}

impl ParamValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ParamValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

/// Arguments handed to a handler after validation.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Coerced values keyed by the handler's argument names.
    pub values: HashMap<String, ParamValue>,
    /// Validated request body, bound to the contract's body argument.
    pub body: Option<Value>,
    /// Raw inbound event, present when the contract requests it.
    pub event: Option<Event>,
    /// Execution context, present when the contract requests it.
    pub context: Option<LambdaContext>,
}

impl Args {
    #[must_use]
    pub fn get(&self, arg_name: &str) -> Option<&ParamValue> {
        self.values.get(arg_name)
    }
}

/// Coerce one raw string to the descriptor's scalar target.
fn coerce(raw: &str, target: &ScalarType) -> Option<ParamValue> {
    match target {
        ScalarType::Str => Some(ParamValue::Str(raw.to_string())),
        ScalarType::Int => raw.parse().ok().map(ParamValue::Int),
        ScalarType::Float => raw.parse().ok().map(ParamValue::Float),
        ScalarType::Bool => raw.parse().ok().map(ParamValue::Bool),
        ScalarType::Uuid => Uuid::parse_str(raw).ok().map(ParamValue::Uuid),
        ScalarType::Enum(spec) => {
            if spec.values.iter().any(|v| v == raw) {
                Some(ParamValue::Str(raw.to_string()))
            } else {
                None
            }
        }
    }
}

/// Extract and coerce one source's parameters against its descriptors.
///
/// An absent `raw` map is treated as empty. For each descriptor: a missing
/// required value appends `"Required parameter {name} not found in
/// {source}."`; a failed coercion appends `"{name} should be {type} type."`;
/// a missing optional value coerces to [`ParamValue::Null`]. Successful
/// values are stored under the descriptor's *argument* name, which may
/// differ from its source name.
#[must_use]
pub fn extract_params(
    raw: Option<&HashMap<String, String>>,
    expected: &[ParamSchema],
) -> (HashMap<String, ParamValue>, Vec<String>) {
    let empty = HashMap::new();
    let raw = raw.unwrap_or(&empty);
    let mut values = HashMap::new();
    let mut errors = Vec::new();

    for schema in expected {
        let param = raw.get(&schema.name);
        match param {
            None if schema.is_required => {
                errors.push(format!(
                    "Required parameter {} not found in {}.",
                    schema.name, schema.location
                ));
            }
            None => {
                values.insert(schema.arg_name.clone(), ParamValue::Null);
            }
            Some(raw_value) => match coerce(raw_value, &schema.target) {
                Some(value) => {
                    values.insert(schema.arg_name.clone(), value);
                }
                None => {
                    errors.push(format!(
                        "{} should be {} type.",
                        schema.name,
                        schema.target.type_name()
                    ));
                }
            },
        }
    }

    (values, errors)
}

/// Parse and validate a request body against its model.
///
/// An absent, blank or unparsable body yields `"Request body is empty!"`.
/// Field failures are collected per the model's classification rules; only
/// on zero errors is the validated instance returned, with unknown fields
/// dropped.
#[must_use]
pub fn extract_body(raw: Option<&str>, model: &ModelSpec) -> (Option<Value>, Vec<String>) {
    let parsed = raw
        .filter(|body| !body.trim().is_empty())
        .and_then(|body| serde_json::from_str::<Value>(body).ok());
    let Some(parsed) = parsed else {
        return (None, vec!["Request body is empty!".to_string()]);
    };

    match model.coerce(&parsed) {
        Ok(instance) => (Some(instance), Vec::new()),
        Err(errors) => (None, errors),
    }
}
