// Shared fixtures; not every suite uses every helper.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use slsrouter::deploy::cognito_issuer_url;
use slsrouter::deploy::{Authorizer, Cors, HttpApi, Provider, ServerlessConfig};
use slsrouter::model::Model;
use slsrouter::registry::App;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRequest {
    pub x: i64,
    pub y: i64,
}

impl Model for ExampleRequest {
    fn name() -> &'static str {
        "ExampleRequest"
    }

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "x": {"type": "integer"},
                "y": {"type": "integer"},
            },
            "required": ["x", "y"],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleResponse {
    pub message: String,
}

impl Model for ExampleResponse {
    fn name() -> &'static str {
        "ExampleResponse"
    }

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {"type": "string"},
            },
            "required": ["message"],
        })
    }
}

pub fn provider() -> Provider {
    let authorizer = Authorizer::jwt(
        cognito_issuer_url("eu-central-1_abc123"),
        vec!["abc123".to_string()],
    );
    Provider::new(
        "us-east-1",
        "arn:aws:iam::123456789:role/TestLambdaRole",
        HttpApi {
            authorizers: BTreeMap::from([("jwt".to_string(), authorizer)]),
            cors: Cors {
                allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
                exposed_response_headers: vec!["X-Total-Count".to_string()],
                allowed_methods: vec![
                    "GET".to_string(),
                    "POST".to_string(),
                    "OPTIONS".to_string(),
                ],
                allowed_origins: vec!["*".to_string()],
            },
        },
    )
}

pub fn config() -> ServerlessConfig {
    ServerlessConfig::new("lambdas", provider())
}

pub fn app() -> App {
    App::new(config())
}

/// Install a test subscriber so `RUST_LOG` controls crate logging in tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
