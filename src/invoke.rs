//! Per-call orchestration.
//!
//! One invocation walks a fixed pipeline: extract and validate the event
//! against the route's contract, call the handler with the coerced
//! arguments, normalize its return value into the final envelope. Validation
//! failures short-circuit to a `422` error envelope; a handler-raised
//! [`ApiError`] short-circuits to an envelope at its declared status. Any
//! other failure propagates to the host runtime.

use crate::error::InvokeError;
use crate::event::{Event, LambdaContext};
use crate::extract::{self, Args};
use crate::registry::Route;
use crate::response::{self, ResponseEnvelope};

/// Run one inbound event through a registered route.
///
/// # Errors
///
/// [`InvokeError::ResponseValidation`] when the handler's return value does
/// not satisfy the route's declared response class. Validation and domain
/// errors do not error; they become `422` / handler-declared envelopes.
pub fn invoke(
    route: &Route,
    event: &Event,
    context: &LambdaContext,
) -> Result<ResponseEnvelope, InvokeError> {
    let mut args = Args::default();
    if route.contract.add_event || route.skip_validation {
        args.event = Some(event.clone());
    }
    if route.contract.add_context || route.skip_validation {
        args.context = Some(context.clone());
    }

    if !route.skip_validation {
        let mut errors = Vec::new();
        for (raw, expected) in [
            (event.path_parameters.as_ref(), &route.contract.path),
            (Some(&event.headers), &route.contract.header),
            (
                event.query_string_parameters.as_ref(),
                &route.contract.query,
            ),
        ] {
            let (values, source_errors) = extract::extract_params(raw, expected);
            args.values.extend(values);
            errors.extend(source_errors);
        }

        if let (Some(model), Some(_)) = (
            &route.contract.request_body,
            &route.contract.request_body_arg_name,
        ) {
            let (body, body_errors) = extract::extract_body(event.body.as_deref(), model);
            errors.extend(body_errors);
            args.body = body;
        }

        if !errors.is_empty() {
            tracing::debug!(
                name = %route.name,
                errors = errors.len(),
                "request validation failed"
            );
            return Ok(response::error_envelope(&errors, 422, None));
        }
    }

    let output = match (route.handler)(args) {
        Ok(output) => output,
        Err(api_error) => {
            tracing::debug!(
                name = %route.name,
                status = api_error.status_code,
                "handler raised domain error"
            );
            return Ok(response::error_envelope(
                &api_error.messages,
                api_error.status_code,
                api_error.headers.as_ref(),
            ));
        }
    };

    response::normalize(
        output,
        route.response_class.as_ref(),
        Some(route.status_code),
    )
    .map_err(|messages| InvokeError::ResponseValidation { messages })
}
