//! Route/function storage and uniqueness enforcement.

use crate::error::{FunctionDefinitionError, RegistrationError, RouteDefinitionError};
use crate::registry::route::{Function, Route};
use http::Method;
use std::collections::{BTreeMap, BTreeSet};

/// The owning collection of routes and functions for one application or
/// sub-router.
///
/// Routes are keyed by path, then verb. Routes and functions share one name
/// namespace; a name, once taken, is never released. Mutated only during
/// startup registration, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    routes: BTreeMap<String, BTreeMap<String, Route>>,
    functions: BTreeMap<String, Function>,
    names: BTreeSet<String>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finished route.
    ///
    /// # Errors
    ///
    /// [`RouteDefinitionError::DuplicateName`] when the route's name is
    /// already taken by any route or function;
    /// [`RouteDefinitionError::DuplicateRoute`] when its (path, verb) pair is
    /// already registered.
    pub fn add_route(&mut self, route: Route) -> Result<(), RouteDefinitionError> {
        if self.names.contains(&route.name) {
            return Err(RouteDefinitionError::DuplicateName {
                name: route.name.clone(),
            });
        }
        if let Some(methods) = self.routes.get(&route.path) {
            if methods.contains_key(route.method.as_str()) {
                return Err(RouteDefinitionError::DuplicateRoute {
                    method: route.method.clone(),
                    path: route.path.clone(),
                });
            }
        }

        tracing::debug!(
            name = %route.name,
            method = %route.method,
            path = %route.path,
            "registered route"
        );
        self.names.insert(route.name.clone());
        self.routes
            .entry(route.path.clone())
            .or_default()
            .insert(route.method.as_str().to_string(), route);
        Ok(())
    }

    /// Insert a background function; same name-uniqueness rule as routes.
    pub fn add_function(&mut self, function: Function) -> Result<(), FunctionDefinitionError> {
        if self.names.contains(&function.name) {
            return Err(FunctionDefinitionError::DuplicateName {
                name: function.name.clone(),
            });
        }
        tracing::debug!(name = %function.name, "registered function");
        self.names.insert(function.name.clone());
        self.functions.insert(function.name.clone(), function);
        Ok(())
    }

    /// Re-home every route and function of `other` into this registry,
    /// prefixing every path. Uniqueness checks re-fire against this registry,
    /// so merging the same sub-registry twice fails on its first name.
    pub fn merge(&mut self, other: Registry, prefix: &str) -> Result<(), RegistrationError> {
        for (path, methods) in other.routes {
            for (_, mut route) in methods {
                route.path = format!("{prefix}{path}");
                self.add_route(route)?;
            }
        }
        for (_, function) in other.functions {
            self.add_function(function)?;
        }
        Ok(())
    }

    /// Look up one registered route.
    #[must_use]
    pub fn route(&self, path: &str, method: &Method) -> Option<&Route> {
        self.routes.get(path)?.get(method.as_str())
    }

    /// All routes, keyed by path then verb, in path order.
    #[must_use]
    pub fn routes(&self) -> &BTreeMap<String, BTreeMap<String, Route>> {
        &self.routes
    }

    /// All background functions in name order.
    #[must_use]
    pub fn functions(&self) -> &BTreeMap<String, Function> {
        &self.functions
    }

    /// Every route in path order, flattened across verbs.
    pub fn iter_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values().flat_map(BTreeMap::values)
    }
}
