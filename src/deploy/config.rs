//! Deployment descriptor model.
//!
//! Mirrors the `serverless.yml` document structure. Everything here is
//! plain data serialized with serde_yaml; interpolation references
//! (CloudFormation exports, file lookups) are carried as already-rendered
//! `${...}` strings so the emitted document stays provider-native.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plugins every generated descriptor carries.
pub const DEFAULT_PLUGINS: &[&str] = &[
    "serverless-plugin-common-excludes",
    "serverless-plugin-include-dependencies",
];

/// CloudFormation export reference, stage-interpolated at deploy time.
#[must_use]
pub fn cloud_formation_ref(stack_name: &str, export_name: &str) -> String {
    format!("${{cf:{stack_name}-${{opt:stage}}.{export_name}}}")
}

/// Reference to a field of a JSON file next to the descriptor.
#[must_use]
pub fn json_file_ref(file_path: &str, field: &str) -> String {
    format!("${{file({file_path}):{field}}}")
}

/// Issuer URL for a Cognito user pool, region-interpolated at deploy time.
#[must_use]
pub fn cognito_issuer_url(user_pool_id: &str) -> String {
    format!("https://cognito-idp.${{region}}.amazonaws.com/{user_pool_id}")
}

/// JWT authorizer attached to the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorizer {
    #[serde(rename = "type")]
    pub kind: String,
    pub identity_source: String,
    pub issuer_url: String,
    pub audience: Vec<String>,
}

impl Authorizer {
    /// JWT authorizer with the default `Authorization`-header identity source.
    #[must_use]
    pub fn jwt(issuer_url: impl Into<String>, audience: Vec<String>) -> Self {
        Self {
            kind: "jwt".to_string(),
            identity_source: "$request.header.Authorization".to_string(),
            issuer_url: issuer_url.into(),
            audience,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cors {
    pub allowed_headers: Vec<String>,
    pub exposed_response_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpApi {
    pub authorizers: BTreeMap<String, Authorizer>,
    pub cors: Cors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vpc {
    pub security_group_ids: Vec<String>,
    pub subnet_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub name: String,
    pub runtime: String,
    pub region: String,
    pub role: String,
    pub http_api: HttpApi,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<Vpc>,
}

impl Provider {
    #[must_use]
    pub fn new(region: impl Into<String>, role: impl Into<String>, http_api: HttpApi) -> Self {
        Self {
            name: "aws".to_string(),
            runtime: "provided.al2023".to_string(),
            region: region.into(),
            role: role.into(),
            http_api,
            vpc: None,
        }
    }

    #[must_use]
    pub fn vpc(mut self, vpc: Vpc) -> Self {
        self.vpc = Some(vpc);
        self
    }
}

/// Authorizer attachment on one HTTP API event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizerRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpApiEvent {
    pub path: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer: Option<AuthorizerRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEvent {
    #[serde(rename = "httpApi")]
    pub http_api: HttpApiEvent,
}

/// One deployable function entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionConfig {
    pub handler: String,
    pub module: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub events: Vec<FunctionEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub layers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,
}

/// Split a handler location into its module directory and handler entry.
///
/// `auth/login.handler` becomes module `auth` and handler `login.handler`;
/// a bare `login.handler` gets module `.`.
pub(crate) fn split_handler_location(location: &str) -> (String, String) {
    match location.rsplit_once('/') {
        Some((module, handler)) => (module.to_string(), handler.to_string()),
        None => (".".to_string(), location.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub individually: bool,
}

/// Root of the emitted `serverless.yml` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerlessConfig {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<BTreeMap<String, serde_yaml::Value>>,
    pub plugins: Vec<String>,
    #[serde(rename = "configValidationMode")]
    pub config_validation_mode: String,
    pub provider: Provider,
    pub package: Package,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<BTreeMap<String, FunctionConfig>>,
}

impl ServerlessConfig {
    /// New descriptor with the default plugin set and per-function packaging.
    #[must_use]
    pub fn new(service: impl Into<String>, provider: Provider) -> Self {
        Self {
            service: service.into(),
            custom: None,
            plugins: DEFAULT_PLUGINS.iter().map(ToString::to_string).collect(),
            config_validation_mode: "error".to_string(),
            provider,
            package: Package { individually: true },
            functions: None,
        }
    }

    /// Add a plugin, ignoring one already present.
    #[must_use]
    pub fn plugin(mut self, plugin: impl Into<String>) -> Self {
        let plugin = plugin.into();
        if !self.plugins.contains(&plugin) {
            self.plugins.push(plugin);
        }
        self
    }

    #[must_use]
    pub fn custom(mut self, key: impl Into<String>, value: serde_yaml::Value) -> Self {
        self.custom
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }
}
