//! Deployment descriptor emission.
//!
//! Turns a registered [`App`](crate::registry::App) into a `serverless.yml`
//! document: provider configuration supplied by the caller, one function
//! entry per registered route (with its HTTP API event and authorizer
//! attachment) and per background function.

mod config;
mod error;
mod generate;

pub use config::{
    cloud_formation_ref, cognito_issuer_url, json_file_ref, Authorizer, AuthorizerRef, Cors,
    FunctionConfig, FunctionEvent, HttpApi, HttpApiEvent, Package, Provider, ServerlessConfig,
    Vpc, DEFAULT_PLUGINS,
};
pub use error::DeployError;
pub use generate::{generate_serverless_file, serverless_config};
