//! Parameter declarations.
//!
//! Handlers are registered with an explicit list of [`HandlerParam`]s. Each
//! declared argument either carries a location [`Marker`] (path, query or
//! header, with an optional override of the external name), is a request
//! body (a model-annotated argument with no marker), or is one of the two
//! specially named arguments `event` / `context`.

use crate::model::ModelSpec;
use crate::typing::TypeAnnotation;
use std::fmt;

/// Where a parameter's raw value is read from in the inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
        }
    }
}

/// Location marker attached to a declared parameter.
///
/// Carries an optional override name; when absent, the external key defaults
/// to the argument's own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub location: ParameterLocation,
    pub name: Option<String>,
}

impl Marker {
    #[must_use]
    pub fn path() -> Self {
        Self {
            location: ParameterLocation::Path,
            name: None,
        }
    }

    #[must_use]
    pub fn query() -> Self {
        Self {
            location: ParameterLocation::Query,
            name: None,
        }
    }

    #[must_use]
    pub fn header() -> Self {
        Self {
            location: ParameterLocation::Header,
            name: None,
        }
    }

    /// Override the external key this parameter is read from.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One declared handler argument.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerParam {
    /// The handler's own argument name; coerced values are keyed by it.
    pub arg_name: String,
    pub annotation: TypeAnnotation,
    /// Location marker; `None` for request bodies and unclassifiable args.
    pub marker: Option<Marker>,
}

impl HandlerParam {
    /// A bare argument with no marker. Unless its annotation is a model
    /// (making it the request body) or it is named `event`/`context`, the
    /// contract builder will leave it unclassified.
    pub fn new(arg_name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        Self {
            arg_name: arg_name.into(),
            annotation,
            marker: None,
        }
    }

    /// An argument bound to a location marker.
    pub fn marked(
        arg_name: impl Into<String>,
        annotation: TypeAnnotation,
        marker: Marker,
    ) -> Self {
        Self {
            arg_name: arg_name.into(),
            annotation,
            marker: Some(marker),
        }
    }

    /// A request-body argument for the given model.
    pub fn body(arg_name: impl Into<String>, model: ModelSpec) -> Self {
        Self {
            arg_name: arg_name.into(),
            annotation: TypeAnnotation::Model(model),
            marker: None,
        }
    }
}
