//! Handler contract construction.
//!
//! At registration time each route's declared parameter list is resolved
//! into a [`HandlerContract`]: one [`ParamSchema`] descriptor per classified
//! parameter plus the optional request-body model and the event/context
//! injection flags. Resolution performs no I/O and fails only with
//! declaration-time errors.

use crate::error::RouteDefinitionError;
use crate::model::ModelSpec;
use crate::params::{HandlerParam, Marker, ParameterLocation};
use crate::typing::{ScalarType, TypeAnnotation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static PATH_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.*?)\}").expect("placeholder regex is valid"));

/// Descriptor for one classified handler parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSchema {
    /// External key to read, defaulting to the argument name.
    pub name: String,
    /// The handler's argument name; coerced values are keyed by it.
    pub arg_name: String,
    pub location: ParameterLocation,
    /// Scalar coercion target after optional-unwrapping.
    pub target: ScalarType,
    pub is_required: bool,
}

impl ParamSchema {
    /// Allowed values when the coercion target is an enumeration.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.target {
            ScalarType::Enum(spec) => Some(&spec.values),
            _ => None,
        }
    }
}

/// Validation contract derived once per handler at registration time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandlerContract {
    /// Path descriptors in declaration order.
    pub path: Vec<ParamSchema>,
    /// Query descriptors in declaration order.
    pub query: Vec<ParamSchema>,
    /// Header descriptors in declaration order.
    pub header: Vec<ParamSchema>,
    pub request_body: Option<ModelSpec>,
    pub request_body_arg_name: Option<String>,
    /// Inject the raw inbound event as a handler argument.
    pub add_event: bool,
    /// Inject the execution context as a handler argument.
    pub add_context: bool,
    /// Declared parameter count excluding `event`/`context`.
    pub(crate) declared: usize,
}

impl HandlerContract {
    /// Number of classified parameters: path + query + header + body.
    #[must_use]
    pub fn count(&self) -> usize {
        self.path.len()
            + self.query.len()
            + self.header.len()
            + usize::from(self.request_body.is_some())
    }

    /// Whether every declared parameter was classified.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count() == self.declared
    }

    fn location_mut(&mut self, location: ParameterLocation) -> &mut Vec<ParamSchema> {
        match location {
            ParameterLocation::Path => &mut self.path,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::Header => &mut self.header,
        }
    }
}

/// Placeholder names appearing in a path template, e.g. `{user_id}`.
#[must_use]
pub fn path_param_names(path: &str) -> BTreeSet<String> {
    PATH_PLACEHOLDER_RE
        .captures_iter(path)
        .map(|c| c[1].to_string())
        .collect()
}

/// Resolve a declared parameter list into a [`HandlerContract`].
///
/// Classification rules, applied per parameter:
/// - arguments named `event` / `context` set the injection flags and are
///   excluded from the declared count and the descriptor lists;
/// - a marker-less argument with a model annotation becomes the request body
///   (only the first one; later model arguments stay unclassified);
/// - an argument with a location marker becomes a descriptor in that
///   location, keyed by the marker's override name or the argument name;
/// - anything else stays unclassified and is caught by the contract-count
///   check at route registration.
///
/// # Errors
///
/// [`RouteDefinitionError::DuplicateParam`] when two descriptors in the same
/// location share a source name.
pub fn resolve(
    handler_name: &str,
    params: &[HandlerParam],
) -> Result<HandlerContract, RouteDefinitionError> {
    let mut contract = HandlerContract::default();

    for param in params {
        match param.arg_name.as_str() {
            "event" => {
                contract.add_event = true;
                continue;
            }
            "context" => {
                contract.add_context = true;
                continue;
            }
            _ => contract.declared += 1,
        }

        match &param.marker {
            None => {
                if contract.request_body.is_none() {
                    if let TypeAnnotation::Model(model) = &param.annotation {
                        contract.request_body = Some(model.clone());
                        contract.request_body_arg_name = Some(param.arg_name.clone());
                    }
                }
                // Anything else stays unclassified.
            }
            Some(marker) => {
                if let Some(schema) = classify(param, marker) {
                    let slot = contract.location_mut(marker.location);
                    if slot.iter().any(|existing| existing.name == schema.name) {
                        return Err(RouteDefinitionError::DuplicateParam {
                            handler: handler_name.to_string(),
                            location: marker.location,
                            name: schema.name,
                        });
                    }
                    slot.push(schema);
                }
            }
        }
    }

    Ok(contract)
}

/// Build the descriptor for a marker-bound parameter.
///
/// Returns `None` when the unwrapped annotation is not a scalar; such a
/// parameter cannot be coerced from a raw string and stays unclassified.
fn classify(param: &HandlerParam, marker: &Marker) -> Option<ParamSchema> {
    let is_required = param.annotation.is_required();
    let target = match param.annotation.unwrap_optional() {
        TypeAnnotation::Scalar(scalar) => scalar.clone(),
        _ => return None,
    };
    let name = marker
        .name
        .clone()
        .unwrap_or_else(|| param.arg_name.clone());
    Some(ParamSchema {
        name,
        arg_name: param.arg_name.clone(),
        location: marker.location,
        target,
        is_required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::TypeAnnotation as T;

    #[test]
    fn test_path_param_names() {
        let names = path_param_names("/users/{user_id}/cars/{car_id}");
        assert_eq!(
            names,
            BTreeSet::from(["user_id".to_string(), "car_id".to_string()])
        );
        assert!(path_param_names("/plain/path").is_empty());
    }

    #[test]
    fn test_event_and_context_become_flags() {
        let contract = resolve(
            "handler",
            &[
                HandlerParam::new("event", T::str()),
                HandlerParam::new("context", T::str()),
            ],
        )
        .unwrap();
        assert!(contract.add_event);
        assert!(contract.add_context);
        assert_eq!(contract.count(), 0);
        assert!(contract.is_complete());
    }

    #[test]
    fn test_marker_override_name() {
        let contract = resolve(
            "handler",
            &[HandlerParam::marked(
                "user_id_header",
                T::int(),
                Marker::header().named("user_id"),
            )],
        )
        .unwrap();
        assert_eq!(contract.header[0].name, "user_id");
        assert_eq!(contract.header[0].arg_name, "user_id_header");
    }

    #[test]
    fn test_duplicate_source_name_rejected() {
        let err = resolve(
            "handler",
            &[
                HandlerParam::marked("user_id", T::str(), Marker::header()),
                HandlerParam::marked("something", T::str(), Marker::header().named("user_id")),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "handler expects two same header params: 'user_id'!"
        );
    }

    #[test]
    fn test_unmarked_scalar_stays_unclassified() {
        let contract = resolve("handler", &[HandlerParam::new("x", T::int())]).unwrap();
        assert_eq!(contract.count(), 0);
        assert!(!contract.is_complete());
    }
}
