use crate::params::ParameterLocation;
use http::Method;
use std::collections::BTreeMap;
use std::fmt;

/// Declaration-time route registration failure.
///
/// Raised while routes are being declared, before any event is served.
/// Misconfiguration is fatal to startup: none of these are recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDefinitionError {
    /// A route or function with this name is already registered.
    DuplicateName { name: String },
    /// The (path, verb) pair is already registered.
    DuplicateRoute { method: Method, path: String },
    /// The handler declares parameters the contract could not classify.
    UnrecognizedParams { method: Method, path: String },
    /// A `{placeholder}` in the path template has no matching path parameter.
    MissingPathParam { name: String },
    /// A declared path parameter does not appear in the path template.
    UnboundPathParam {
        name: String,
        method: Method,
        path: String,
    },
    /// GET and DELETE routes cannot carry a request body.
    RequestBodyNotAllowed { method: Method, path: String },
    /// Two parameters in the same location resolve to the same source name.
    DuplicateParam {
        handler: String,
        location: ParameterLocation,
        name: String,
    },
    /// Only GET, POST, DELETE, PUT and PATCH are deployable verbs.
    UnsupportedMethod { method: Method },
    /// The route builder was finished without a handler.
    MissingHandler { name: String },
}

impl fmt::Display for RouteDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDefinitionError::DuplicateName { name } => {
                write!(f, "There is already {name} lambda registered.")
            }
            RouteDefinitionError::DuplicateRoute { method, path } => {
                write!(
                    f,
                    "There is already existing \"{method}\" method definition under \"{path}\" path."
                )
            }
            RouteDefinitionError::UnrecognizedParams { method, path } => {
                write!(f, "Unrecognized params for {method} method on \"{path}\" path!")
            }
            RouteDefinitionError::MissingPathParam { name } => {
                write!(f, "You did not specify {name} in your handler arguments!")
            }
            RouteDefinitionError::UnboundPathParam { name, method, path } => {
                write!(
                    f,
                    "Your {name} path parameter is missing in {method} method on \"{path}\" path!"
                )
            }
            RouteDefinitionError::RequestBodyNotAllowed { method, path } => {
                write!(f, "{method} method on \"{path}\" cannot have request body!")
            }
            RouteDefinitionError::DuplicateParam {
                handler,
                location,
                name,
            } => {
                write!(f, "{handler} expects two same {location} params: '{name}'!")
            }
            RouteDefinitionError::UnsupportedMethod { method } => {
                write!(f, "Unsupported HTTP method: {method}.")
            }
            RouteDefinitionError::MissingHandler { name } => {
                write!(f, "Route {name} was declared without a handler.")
            }
        }
    }
}

impl std::error::Error for RouteDefinitionError {}

/// Declaration-time background-function registration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionDefinitionError {
    /// A route or function with this name is already registered.
    DuplicateName { name: String },
}

impl fmt::Display for FunctionDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionDefinitionError::DuplicateName { name } => {
                write!(f, "There is already {name} lambda registered.")
            }
        }
    }
}

impl std::error::Error for FunctionDefinitionError {}

/// Either kind of registration failure, produced when a sub-router is merged
/// and its routes and functions re-fire uniqueness checks against the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    Route(RouteDefinitionError),
    Function(FunctionDefinitionError),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::Route(e) => e.fmt(f),
            RegistrationError::Function(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationError {}

impl From<RouteDefinitionError> for RegistrationError {
    fn from(e: RouteDefinitionError) -> Self {
        RegistrationError::Route(e)
    }
}

impl From<FunctionDefinitionError> for RegistrationError {
    fn from(e: FunctionDefinitionError) -> Self {
        RegistrationError::Function(e)
    }
}

/// Non-recoverable invocation failure.
///
/// Raised only when a handler's return value violates the route's declared
/// response class. Unlike validation and domain errors it is not converted
/// to an envelope; it propagates to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    ResponseValidation { messages: Vec<String> },
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::ResponseValidation { messages } => {
                write!(f, "Response validation failed: {}", messages.join("; "))
            }
        }
    }
}

impl std::error::Error for InvokeError {}

/// Recoverable, handler-raised domain error.
///
/// Carries one or more user-facing messages, an explicit status code and
/// optional extra response headers. The invocation wrapper converts it to a
/// structured error envelope at the declared status code; it never escapes
/// to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub messages: Vec<String>,
    pub status_code: u16,
    pub headers: Option<BTreeMap<String, String>>,
}

impl ApiError {
    /// Single-message domain error.
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            messages: vec![message.into()],
            status_code,
            headers: None,
        }
    }

    /// Domain error carrying a list of messages.
    pub fn with_messages(messages: Vec<String>, status_code: u16) -> Self {
        Self {
            messages,
            status_code,
            headers: None,
        }
    }

    /// Attach an extra response header to the produced error envelope.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status_code, self.messages.join("; "))
    }
}

impl std::error::Error for ApiError {}
