//! Route and function definitions.

use crate::contract::{self, HandlerContract};
use crate::error::{ApiError, RouteDefinitionError};
use crate::extract::Args;
use crate::model::{Model, ModelSpec};
use crate::params::HandlerParam;
use crate::response::HandlerOutput;
use http::Method;
use std::fmt;
use std::sync::Arc;

/// The user-supplied callable bound to a route or function.
pub type Handler = Arc<dyn Fn(Args) -> Result<HandlerOutput, ApiError> + Send + Sync>;

/// Status code used when a route does not declare one explicitly.
#[must_use]
pub fn default_status_code(method: &Method) -> u16 {
    match method.as_str() {
        "POST" => 201,
        "DELETE" => 204,
        _ => 200,
    }
}

fn supported(method: &Method) -> bool {
    matches!(
        method.as_str(),
        "GET" | "POST" | "DELETE" | "PUT" | "PATCH"
    )
}

/// A registered HTTP endpoint.
#[derive(Clone)]
pub struct Route {
    pub name: String,
    pub path: String,
    pub method: Method,
    pub handler: Handler,
    pub contract: HandlerContract,
    pub status_code: u16,
    pub response_class: Option<ModelSpec>,
    pub authorizer: Option<String>,
    pub tags: Vec<String>,
    pub summary: String,
    pub description: Option<String>,
    pub use_vpc: bool,
    pub layers: Vec<String>,
    pub skip_validation: bool,
    /// Deployment handler location, e.g. `auth/login.handler`.
    pub handler_location: String,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("status_code", &self.status_code)
            .field("skip_validation", &self.skip_validation)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Route`], finished by the router's verb methods.
///
/// The path and verb come from the registration call; everything else is
/// declared here. The handler and its parameter list are mandatory for any
/// route that does not skip validation.
pub struct RouteBuilder {
    name: String,
    handler: Option<Handler>,
    params: Vec<HandlerParam>,
    status_code: Option<u16>,
    response_class: Option<ModelSpec>,
    authorizer: Option<String>,
    tags: Vec<String>,
    summary: Option<String>,
    description: Option<String>,
    use_vpc: bool,
    layers: Vec<String>,
    skip_validation: bool,
    handler_location: Option<String>,
}

impl RouteBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: None,
            params: Vec::new(),
            status_code: None,
            response_class: None,
            authorizer: None,
            tags: Vec::new(),
            summary: None,
            description: None,
            use_vpc: true,
            layers: Vec::new(),
            skip_validation: false,
            handler_location: None,
        }
    }

    #[must_use]
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(Args) -> Result<HandlerOutput, ApiError> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Declare one handler argument.
    #[must_use]
    pub fn param(mut self, param: HandlerParam) -> Self {
        self.params.push(param);
        self
    }

    /// Declare the full argument list at once.
    #[must_use]
    pub fn params(mut self, params: Vec<HandlerParam>) -> Self {
        self.params.extend(params);
        self
    }

    #[must_use]
    pub fn status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Declare the response class return values are validated against.
    #[must_use]
    pub fn response_class<M: Model>(mut self) -> Self {
        self.response_class = Some(ModelSpec::of::<M>());
        self
    }

    #[must_use]
    pub fn authorizer(mut self, name: impl Into<String>) -> Self {
        self.authorizer = Some(name.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn use_vpc(mut self, use_vpc: bool) -> Self {
        self.use_vpc = use_vpc;
        self
    }

    #[must_use]
    pub fn layer(mut self, layer: impl Into<String>) -> Self {
        self.layers.push(layer.into());
        self
    }

    /// Bypass contract-count enforcement and request-time validation; the
    /// handler receives the raw event and context instead of coerced values.
    #[must_use]
    pub fn skip_validation(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    /// Deployment handler location; defaults to `{name}.handler`.
    #[must_use]
    pub fn handler_location(mut self, location: impl Into<String>) -> Self {
        self.handler_location = Some(location.into());
        self
    }

    /// Finish the route against its registration path and verb.
    ///
    /// Runs every declaration-time check: verb support, contract
    /// completeness (unless validation is skipped), the bijection between
    /// `{placeholder}` segments and path descriptors, and the no-body rule
    /// for GET/DELETE.
    pub(crate) fn build(self, method: Method, path: &str) -> Result<Route, RouteDefinitionError> {
        if !supported(&method) {
            return Err(RouteDefinitionError::UnsupportedMethod { method });
        }
        let Some(handler) = self.handler else {
            return Err(RouteDefinitionError::MissingHandler { name: self.name });
        };

        let contract = contract::resolve(&self.name, &self.params)?;

        if !self.skip_validation && !contract.is_complete() {
            return Err(RouteDefinitionError::UnrecognizedParams {
                method,
                path: path.to_string(),
            });
        }

        let placeholders = contract::path_param_names(path);
        for placeholder in &placeholders {
            if !contract.path.iter().any(|p| p.name == *placeholder) {
                return Err(RouteDefinitionError::MissingPathParam {
                    name: placeholder.clone(),
                });
            }
        }
        for schema in &contract.path {
            if !placeholders.contains(&schema.name) {
                return Err(RouteDefinitionError::UnboundPathParam {
                    name: schema.name.clone(),
                    method,
                    path: path.to_string(),
                });
            }
        }

        if matches!(method.as_str(), "GET" | "DELETE") && contract.request_body.is_some() {
            return Err(RouteDefinitionError::RequestBodyNotAllowed {
                method,
                path: path.to_string(),
            });
        }

        let status_code = self
            .status_code
            .unwrap_or_else(|| default_status_code(&method));
        let handler_location = self
            .handler_location
            .unwrap_or_else(|| format!("{}.handler", self.name));

        Ok(Route {
            name: self.name,
            path: path.to_string(),
            method,
            handler,
            contract,
            status_code,
            response_class: self.response_class,
            authorizer: self.authorizer,
            tags: self.tags,
            summary: self.summary.unwrap_or_else(|| "API endpoint".to_string()),
            description: self.description,
            use_vpc: self.use_vpc,
            layers: self.layers,
            skip_validation: self.skip_validation,
            handler_location,
        })
    }
}

/// A registered non-HTTP lambda: a name, a handler and its deployment
/// attributes, but no path, verb or status code.
#[derive(Clone)]
pub struct Function {
    pub name: String,
    pub handler: Handler,
    pub use_vpc: bool,
    pub layers: Vec<String>,
    pub handler_location: String,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("use_vpc", &self.use_vpc)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl Function {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Args) -> Result<HandlerOutput, ApiError> + Send + Sync + 'static,
    {
        let name = name.into();
        let handler_location = format!("{name}.handler");
        Self {
            name,
            handler: Arc::new(handler),
            use_vpc: true,
            layers: Vec::new(),
            handler_location,
        }
    }

    #[must_use]
    pub fn use_vpc(mut self, use_vpc: bool) -> Self {
        self.use_vpc = use_vpc;
        self
    }

    #[must_use]
    pub fn layer(mut self, layer: impl Into<String>) -> Self {
        self.layers.push(layer.into());
        self
    }

    #[must_use]
    pub fn handler_location(mut self, location: impl Into<String>) -> Self {
        self.handler_location = location.into();
        self
    }
}
