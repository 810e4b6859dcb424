//! Response normalization.
//!
//! A handler may return a plain JSON map, a typed model wrapped in a
//! [`JsonResponse`], or a fully built [`ResponseEnvelope`]. The normalizer
//! collapses all of these into the `statusCode`/`headers`/`body` envelope
//! the host runtime expects, applying the route's declared response class
//! and default status code along the way.

use crate::encoder;
use crate::model::{Model, ModelSpec};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Final outbound record handed back to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    /// Body parsed back as JSON; `Null` when the body is not valid JSON.
    #[must_use]
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Payload carried by a [`JsonResponse`] before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// A plain field-map (or any other JSON tree).
    Map(Value),
    /// A serialized model instance, tagged with its model name.
    Model { name: String, value: Value },
}

/// Structured response wrapper a handler can return instead of a bare map.
///
/// Lets the handler override the route's status code and attach extra
/// headers while still going through response-class validation.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub data: ResponseData,
    pub status_code: Option<u16>,
    pub additional_headers: Option<BTreeMap<String, String>>,
}

impl JsonResponse {
    /// Wrap a plain JSON tree.
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self {
            data: ResponseData::Map(data),
            status_code: None,
            additional_headers: None,
        }
    }

    /// Wrap a typed model instance.
    pub fn model<M: Model>(instance: &M) -> Result<Self, Vec<String>> {
        Ok(Self {
            data: ResponseData::Model {
                name: M::name().to_string(),
                value: encoder::to_value(instance)?,
            },
            status_code: None,
            additional_headers: None,
        })
    }

    /// Override the route's status code.
    #[must_use]
    pub fn status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Attach an extra response header; wins over defaults on collision.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// What a handler hands back to the invocation wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    Json(JsonResponse),
    /// A pre-built envelope; normalization passes it through unchanged.
    Raw(ResponseEnvelope),
}

impl From<JsonResponse> for HandlerOutput {
    fn from(response: JsonResponse) -> Self {
        HandlerOutput::Json(response)
    }
}

impl From<ResponseEnvelope> for HandlerOutput {
    fn from(envelope: ResponseEnvelope) -> Self {
        HandlerOutput::Raw(envelope)
    }
}

impl From<Value> for HandlerOutput {
    fn from(value: Value) -> Self {
        HandlerOutput::Json(JsonResponse::new(value))
    }
}

/// Collapse a handler's return value into the final envelope.
///
/// Pre-built envelopes pass through unchanged. Otherwise, when the route
/// declares a `response_class`: a plain map is validated/coerced into it,
/// and a model of a different type is round-tripped through its field-map
/// into it; an instance of the declared class itself is trusted as-is.
/// Fields absent from the response class are dropped. The explicit status
/// code on the wrapper wins over the route default; headers are the caller's
/// merged over a `Content-Type: application/json` base.
///
/// # Errors
///
/// The accumulated field messages when response-class validation fails.
pub fn normalize(
    output: HandlerOutput,
    response_class: Option<&ModelSpec>,
    default_status: Option<u16>,
) -> Result<ResponseEnvelope, Vec<String>> {
    let response = match output {
        HandlerOutput::Raw(envelope) => return Ok(envelope),
        HandlerOutput::Json(response) => response,
    };

    let body_value = match (&response.data, response_class) {
        (ResponseData::Map(value), Some(class)) => class.coerce(value)?,
        (ResponseData::Model { name, value }, Some(class)) if *name != class.name => {
            class.coerce(value)?
        }
        (ResponseData::Map(value), None)
        | (ResponseData::Model { value, .. }, None)
        | (ResponseData::Model { value, .. }, Some(_)) => value.clone(),
    };

    let status_code = response
        .status_code
        .or(default_status)
        .unwrap_or(200);

    let mut headers = BTreeMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]);
    if let Some(additional) = response.additional_headers {
        headers.extend(additional);
    }

    Ok(ResponseEnvelope {
        status_code,
        headers,
        body: encoder::encode(&body_value),
    })
}

/// Build the structured error envelope for a list of messages.
///
/// One message yields `{"message": ...}`; several yield
/// `{"errors": [{"message": ...}, ...]}`.
#[must_use]
pub fn error_envelope(
    messages: &[String],
    status_code: u16,
    additional_headers: Option<&BTreeMap<String, String>>,
) -> ResponseEnvelope {
    let body = if messages.len() == 1 {
        json!({"message": messages[0]})
    } else {
        let errors: Vec<Value> = messages.iter().map(|m| json!({"message": m})).collect();
        json!({"errors": errors})
    };

    let mut headers = BTreeMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]);
    if let Some(additional) = additional_headers {
        headers.extend(additional.clone());
    }

    ResponseEnvelope {
        status_code,
        headers,
        body: encoder::encode(&body),
    }
}
