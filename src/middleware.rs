//! Request-scoped middleware.
//!
//! `request_id_layer` wraps every request in a tracing span keyed by a fresh
//! UUID and echoes that UUID in the `x-request-id` response header.
//! `error_envelope` turns any [`ErrorReport`] left in a response's extensions
//! into the JSON error envelope, adding the request method and path and
//! applying the configured stack policy.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ErrorReport;
use crate::models::{ErrorBody, ErrorResponse};
use crate::state::AppState;

/// Response header carrying the request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates a request ID and runs the request inside a span carrying it.
///
/// Should be the outermost layer so every other log line falls inside the span.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

/// Renders handler errors as `{success: false, error: {...}}` and logs them.
pub async fn error_envelope(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    tracing::error!(
        method = %method,
        path = %path,
        status = report.status.as_u16(),
        message = %report.message,
        "Request failed"
    );
    if let Some(stack) = &report.stack {
        tracing::debug!(stack = %stack, "Error detail");
    }

    let stack = if state.config.expose_error_stack {
        report.stack
    } else {
        None
    };
    let body = ErrorBody::new(report.message, report.status, path, method).with_stack(stack);

    (report.status, ResponseJson(ErrorResponse::new(body))).into_response()
}
