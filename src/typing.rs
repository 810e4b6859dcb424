//! Type annotations for declared handler parameters.
//!
//! A parameter declaration carries a [`TypeAnnotation`] describing the value
//! the coercion engine should produce. Annotations are required unless they
//! are a union with a null branch; `unwrap_optional` recovers the coercion
//! target from such a union.

use crate::model::ModelSpec;
use tracing::warn;

/// Enumerated string type: coerced values must be one of `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    /// Type name used in coercion error messages (e.g. `ExampleEnum`).
    pub name: String,
    /// Ordered list of allowed string values.
    pub values: Vec<String>,
}

/// Scalar coercion target for a path/query/header parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarType {
    Str,
    Int,
    Float,
    Bool,
    Uuid,
    Enum(EnumSpec),
}

impl ScalarType {
    /// Name used in `"{param} should be {type} type."` error messages.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            ScalarType::Str => "str",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Bool => "bool",
            ScalarType::Uuid => "UUID",
            ScalarType::Enum(spec) => &spec.name,
        }
    }
}

/// Declared type of one handler parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// Absence of a value; only meaningful as a union branch.
    Null,
    Scalar(ScalarType),
    /// A structured model, used for request bodies.
    Model(ModelSpec),
    /// Union of several annotations, e.g. `str | None`.
    Union(Vec<TypeAnnotation>),
}

impl TypeAnnotation {
    #[must_use]
    pub fn str() -> Self {
        TypeAnnotation::Scalar(ScalarType::Str)
    }

    #[must_use]
    pub fn int() -> Self {
        TypeAnnotation::Scalar(ScalarType::Int)
    }

    #[must_use]
    pub fn float() -> Self {
        TypeAnnotation::Scalar(ScalarType::Float)
    }

    #[must_use]
    pub fn bool() -> Self {
        TypeAnnotation::Scalar(ScalarType::Bool)
    }

    #[must_use]
    pub fn uuid() -> Self {
        TypeAnnotation::Scalar(ScalarType::Uuid)
    }

    /// Enumerated string type with the given name and allowed values.
    pub fn enumeration(name: impl Into<String>, values: Vec<&str>) -> Self {
        TypeAnnotation::Scalar(ScalarType::Enum(EnumSpec {
            name: name.into(),
            values: values.into_iter().map(str::to_string).collect(),
        }))
    }

    /// Wrap this annotation into a union with a null branch.
    #[must_use]
    pub fn optional(self) -> Self {
        TypeAnnotation::Union(vec![self, TypeAnnotation::Null])
    }

    /// Whether a value for this annotation must be present.
    ///
    /// Only a union that contains a null branch is optional; every other
    /// annotation, including unions of several concrete types, is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        match self {
            TypeAnnotation::Union(branches) => {
                !branches.iter().any(|b| matches!(b, TypeAnnotation::Null))
            }
            _ => true,
        }
    }

    /// The coercion target of an optional annotation.
    ///
    /// Returns the first non-null branch of a union; a non-union annotation
    /// is returned unchanged. When the union carries more than one concrete
    /// branch, only the first is used as the coercion target — the rest are
    /// discarded with a warning rather than silently narrowed.
    #[must_use]
    pub fn unwrap_optional(&self) -> &TypeAnnotation {
        match self {
            TypeAnnotation::Union(branches) => {
                let mut concrete = branches
                    .iter()
                    .filter(|b| !matches!(b, TypeAnnotation::Null));
                let first = concrete.next();
                if concrete.next().is_some() {
                    warn!(
                        "union annotation has several concrete branches; \
                         only the first is used as the coercion target"
                    );
                }
                first.unwrap_or(self)
            }
            other => other,
        }
    }
}
