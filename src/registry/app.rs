//! Application and sub-router surfaces.

use crate::deploy::ServerlessConfig;
use crate::error::{FunctionDefinitionError, RegistrationError, RouteDefinitionError};
use crate::registry::core::Registry;
use crate::registry::route::{Function, RouteBuilder};
use http::Method;

fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// A composable group of routes sharing a path prefix.
///
/// Sub-routers own their registry until they are included into a parent,
/// at which point the registry is drained into the parent's and every path
/// is rewritten under the parent's prefix.
#[derive(Debug, Clone, Default)]
pub struct Router {
    prefix: String,
    registry: Registry,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: normalize_prefix(&prefix.into()),
            registry: Registry::new(),
        }
    }

    /// Register a route under this router's prefix.
    pub fn route(
        &mut self,
        method: Method,
        path: &str,
        route: RouteBuilder,
    ) -> Result<(), RouteDefinitionError> {
        let path = format!("{}{}", self.prefix, normalize_path(path));
        self.registry.add_route(route.build(method, &path)?)
    }

    pub fn get(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.route(Method::GET, path, route)
    }

    pub fn post(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.route(Method::POST, path, route)
    }

    pub fn put(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.route(Method::PUT, path, route)
    }

    pub fn patch(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.route(Method::PATCH, path, route)
    }

    pub fn delete(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.route(Method::DELETE, path, route)
    }

    /// Register a background function.
    pub fn function(&mut self, function: Function) -> Result<(), FunctionDefinitionError> {
        self.registry.add_function(function)
    }

    /// Consume a sub-router, re-homing its routes under this prefix.
    pub fn include(&mut self, router: Router) -> Result<(), RegistrationError> {
        self.registry.merge(router.registry, &self.prefix)
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// The top-level application: a router plus deployment configuration and
/// documentation metadata.
#[derive(Debug, Clone)]
pub struct App {
    pub title: String,
    pub version: String,
    pub config: ServerlessConfig,
    router: Router,
}

impl App {
    #[must_use]
    pub fn new(config: ServerlessConfig) -> Self {
        Self {
            title: "My API".to_string(),
            version: "v0.0.1".to_string(),
            config,
            router: Router::new(),
        }
    }

    #[must_use]
    pub fn with_prefix(config: ServerlessConfig, prefix: impl Into<String>) -> Self {
        Self {
            router: Router::with_prefix(prefix),
            ..Self::new(config)
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn route(
        &mut self,
        method: Method,
        path: &str,
        route: RouteBuilder,
    ) -> Result<(), RouteDefinitionError> {
        self.router.route(method, path, route)
    }

    pub fn get(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.router.get(path, route)
    }

    pub fn post(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.router.post(path, route)
    }

    pub fn put(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.router.put(path, route)
    }

    pub fn patch(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.router.patch(path, route)
    }

    pub fn delete(&mut self, path: &str, route: RouteBuilder) -> Result<(), RouteDefinitionError> {
        self.router.delete(path, route)
    }

    pub fn function(&mut self, function: Function) -> Result<(), FunctionDefinitionError> {
        self.router.function(function)
    }

    pub fn include(&mut self, router: Router) -> Result<(), RegistrationError> {
        self.router.include(router)
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.router.registry()
    }
}
