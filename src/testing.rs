//! In-process test client.
//!
//! Builds boundary events the way the host runtime would and dispatches
//! them through a registered route, so applications can be exercised
//! end to end without any deployed infrastructure.

use crate::event::{Event, LambdaContext};
use crate::invoke;
use crate::registry::App;
use anyhow::Context;
use http::Method;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Request parts for one test invocation.
#[derive(Debug, Clone, Default)]
pub struct TestRequest {
    body: Option<String>,
    headers: HashMap<String, String>,
    query_params: Option<HashMap<String, String>>,
    path_params: Option<HashMap<String, String>>,
}

impl TestRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// JSON request body.
    #[must_use]
    pub fn json(mut self, value: &Value) -> Self {
        self.body = Some(value.to_string());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Decoded invocation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// Body parsed as JSON; `Null` when the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Drives an [`App`]'s routes in-process.
pub struct TestClient<'a> {
    app: &'a App,
}

impl<'a> TestClient<'a> {
    #[must_use]
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    /// Dispatch one request to the route registered at `(method, path)`.
    ///
    /// `path` is the registered template (placeholders included); raw path
    /// values travel in the request's `path_params` map, as the host
    /// runtime delivers them.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        request: TestRequest,
    ) -> anyhow::Result<ApiResponse> {
        let route = self
            .app
            .registry()
            .route(path, &method)
            .with_context(|| format!("no route registered for {method} {path}"))?;

        let mut headers =
            HashMap::from([("content-type".to_string(), "application/json".to_string())]);
        headers.extend(request.headers);

        let event = Event {
            path: path.to_string(),
            http_method: method.as_str().to_string(),
            headers,
            query_string_parameters: request.query_params,
            path_parameters: request.path_params,
            body: request.body,
            is_base64_encoded: false,
        };

        let envelope = invoke::invoke(route, &event, &LambdaContext::default())?;
        Ok(ApiResponse {
            status_code: envelope.status_code,
            headers: envelope.headers,
            body: envelope.body,
        })
    }

    pub fn get(&self, path: &str, request: TestRequest) -> anyhow::Result<ApiResponse> {
        self.request(Method::GET, path, request)
    }

    pub fn post(&self, path: &str, request: TestRequest) -> anyhow::Result<ApiResponse> {
        self.request(Method::POST, path, request)
    }

    pub fn put(&self, path: &str, request: TestRequest) -> anyhow::Result<ApiResponse> {
        self.request(Method::PUT, path, request)
    }

    pub fn patch(&self, path: &str, request: TestRequest) -> anyhow::Result<ApiResponse> {
        self.request(Method::PATCH, path, request)
    }

    pub fn delete(&self, path: &str, request: TestRequest) -> anyhow::Result<ApiResponse> {
        self.request(Method::DELETE, path, request)
    }
}
