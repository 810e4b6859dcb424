//! Boundary records exchanged with the host runtime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pre-parsed inbound request record handed over by the host runtime.
///
/// Header/parameter keys are treated literally; case handling is the host's
/// responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub path: String,
    pub http_method: String,
    pub headers: HashMap<String, String>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub path_parameters: Option<HashMap<String, String>>,
    /// Raw body string; expected to be JSON when a body contract exists.
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

/// Minimal execution context injected into handlers that ask for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LambdaContext {
    pub function_name: String,
    pub aws_request_id: String,
    pub memory_limit_in_mb: u32,
}
