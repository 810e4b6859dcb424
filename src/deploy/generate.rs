//! Descriptor generation from a registered application.

use crate::deploy::config::{
    split_handler_location, AuthorizerRef, FunctionConfig, FunctionEvent, HttpApiEvent,
    ServerlessConfig,
};
use crate::deploy::error::DeployError;
use crate::registry::{App, Function, Route};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

impl FunctionConfig {
    /// Deployable entry for one HTTP route.
    #[must_use]
    pub fn from_route(route: &Route) -> Self {
        let (module, handler) = split_handler_location(&route.handler_location);
        Self {
            handler,
            module,
            events: vec![FunctionEvent {
                http_api: HttpApiEvent {
                    path: route.path.clone(),
                    method: route.method.as_str().to_string(),
                    authorizer: route
                        .authorizer
                        .clone()
                        .map(|name| AuthorizerRef { name }),
                },
            }],
            layers: route.layers.clone(),
            environment: None,
        }
    }

    /// Deployable entry for one background function; carries no events.
    #[must_use]
    pub fn from_function(function: &Function) -> Self {
        let (module, handler) = split_handler_location(&function.handler_location);
        Self {
            handler,
            module,
            events: Vec::new(),
            layers: function.layers.clone(),
            environment: None,
        }
    }
}

/// Build the full descriptor for an application: its configured document
/// plus one function entry per registered route and background function.
///
/// # Errors
///
/// [`DeployError::UnknownAuthorizer`] when a route names an authorizer the
/// provider configuration does not define.
pub fn serverless_config(app: &App) -> Result<ServerlessConfig, DeployError> {
    let mut functions: BTreeMap<String, FunctionConfig> = BTreeMap::new();
    for route in app.registry().iter_routes() {
        if let Some(authorizer) = &route.authorizer {
            if !app
                .config
                .provider
                .http_api
                .authorizers
                .contains_key(authorizer)
            {
                return Err(DeployError::UnknownAuthorizer {
                    name: authorizer.clone(),
                });
            }
        }
        functions.insert(route.name.clone(), FunctionConfig::from_route(route));
    }
    for function in app.registry().functions().values() {
        functions.insert(function.name.clone(), FunctionConfig::from_function(function));
    }

    let mut config = app.config.clone();
    config.functions = Some(functions);
    Ok(config)
}

/// Write the application's descriptor to `path` as YAML.
///
/// # Errors
///
/// [`DeployError::NotYaml`] unless `path` ends in `.yml`, plus any
/// serialization or filesystem failure.
pub fn generate_serverless_file(app: &App, path: &Path) -> Result<(), DeployError> {
    if path.extension().and_then(|e| e.to_str()) != Some("yml") {
        return Err(DeployError::NotYaml);
    }

    let config = serverless_config(app)?;
    let rendered = serde_yaml::to_string(&config)?;
    fs::write(path, rendered)?;
    tracing::info!(path = %path.display(), "wrote deployment descriptor");
    Ok(())
}
