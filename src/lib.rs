//! # slsrouter
//!
//! **slsrouter** is a routing-and-validation shim for serverless request
//! handlers. Routes and background functions are declared against an
//! [`App`](registry::App), each with an explicit parameter list; the crate
//! derives a typed contract per handler, validates inbound events against
//! it, and marshals return values into the `statusCode`/`headers`/`body`
//! envelope the host runtime expects. The registered application can also be
//! emitted as a `serverless.yml` deployment descriptor.
//!
//! ## Overview
//!
//! The crate is organized around the per-call pipeline:
//!
//! - **[`typing`]** - type annotations and optional-unwrapping for declared
//!   parameters
//! - **[`params`]** - parameter declarations: locations, markers and
//!   [`HandlerParam`](params::HandlerParam) lists
//! - **[`contract`]** - contract resolution: classifying declared parameters
//!   into path/query/header descriptors, body model and injection flags
//! - **[`model`]** - the [`Model`](model::Model) trait and schema-backed
//!   field validation for request/response bodies
//! - **[`registry`]** - route/function registration, uniqueness enforcement
//!   and sub-router composition
//! - **[`extract`]** - event extraction and type coercion against a contract
//! - **[`response`]** - response normalization and the error-envelope shape
//! - **[`invoke`]** - the per-call orchestration tying the above together
//! - **[`deploy`]** - `serverless.yml` generation from the registry
//! - **[`testing`]** - an in-process test client
//!
//! Registration happens once at startup and fails fast on misconfiguration;
//! request processing is pure per call, accumulating validation errors into
//! `422` envelopes instead of raising.
//!
//! ## Example
//!
//! ```rust,no_run
//! use slsrouter::params::{HandlerParam, Marker};
//! use slsrouter::registry::{RouteBuilder, Router};
//! use slsrouter::response::JsonResponse;
//! use slsrouter::typing::TypeAnnotation;
//! use serde_json::json;
//!
//! let mut router = Router::new();
//! router.get(
//!     "/users/{user_id}",
//!     RouteBuilder::new("get_user")
//!         .param(HandlerParam::marked(
//!             "user_id",
//!             TypeAnnotation::int(),
//!             Marker::path(),
//!         ))
//!         .handler(|args| {
//!             let user_id = args.get("user_id").and_then(|v| v.as_int());
//!             Ok(JsonResponse::new(json!({ "id": user_id })).into())
//!         }),
//! )?;
//! # Ok::<(), slsrouter::error::RouteDefinitionError>(())
//! ```

pub mod contract;
pub mod deploy;
pub mod encoder;
pub mod error;
pub mod event;
pub mod extract;
pub mod invoke;
pub mod model;
pub mod params;
pub mod registry;
pub mod response;
pub mod testing;
pub mod typing;

pub use error::{
    ApiError, FunctionDefinitionError, InvokeError, RegistrationError, RouteDefinitionError,
};
pub use event::{Event, LambdaContext};
pub use extract::{Args, ParamValue};
pub use invoke::invoke;
pub use model::{Model, ModelSpec};
pub use params::{HandlerParam, Marker, ParameterLocation};
pub use registry::{App, Function, Registry, Route, RouteBuilder, Router};
pub use response::{HandlerOutput, JsonResponse, ResponseEnvelope};
