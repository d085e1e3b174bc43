use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use thiserror::Error;

use crate::models::{ErrorBody, ErrorResponse};

/// Boxed error used for failures that carry no HTTP meaning of their own.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Message reported for errors that were not given one.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum AppError {
    /// An expected failure whose status and message go to the client verbatim.
    #[error("{message}")]
    Operational { status: StatusCode, message: String },
    #[error("Route {method} {path} not found")]
    RouteNotFound { method: String, path: String },
    #[error("Internal Server Error")]
    Internal(#[source] BoxError),
}

impl AppError {
    pub fn operational(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Operational {
            status,
            message: message.into(),
        }
    }

    pub fn internal(err: impl Into<BoxError>) -> Self {
        AppError::Internal(err.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Operational { status, .. } => *status,
            AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Debug rendering of the error followed by its `source()` chain.
    ///
    /// This is what error responses expose as `error.stack` outside
    /// production. Routing misses have nothing worth tracing and return `None`.
    pub fn stack(&self) -> Option<String> {
        if matches!(self, AppError::RouteNotFound { .. }) {
            return None;
        }

        let mut stack = format!("{self:?}");
        let mut source = self.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Some(stack)
    }

    pub fn report(&self) -> ErrorReport {
        let message = self.to_string();
        ErrorReport {
            status: self.status_code(),
            message: if message.is_empty() {
                INTERNAL_SERVER_ERROR.to_string()
            } else {
                message
            },
            stack: self.stack(),
        }
    }
}

/// Request-independent summary of an [`AppError`].
///
/// Travels in the response extensions so the error envelope middleware can
/// add the request method, path, and stack policy.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub stack: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = self.report();

        let body = ResponseJson(ErrorResponse::new(ErrorBody::new(
            report.message.clone(),
            report.status,
            String::new(),
            String::new(),
        )));

        let mut response = (report.status, body).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Failures that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn operational_error_keeps_status_and_message() {
        let err = AppError::operational(StatusCode::BAD_GATEWAY, "upstream unavailable");
        let report = err.report();

        assert_eq!(report.status, StatusCode::BAD_GATEWAY);
        assert_eq!(report.message, "upstream unavailable");
        assert!(report.stack.is_some());
    }

    #[test]
    fn operational_error_without_message_falls_back() {
        let report = AppError::operational(StatusCode::BAD_REQUEST, "").report();
        assert_eq!(report.message, INTERNAL_SERVER_ERROR);
        assert_eq!(report.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_error_defaults_to_500() {
        let err = AppError::internal(io::Error::other("disk on fire"));
        let report = err.report();

        assert_eq!(report.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(report.message, INTERNAL_SERVER_ERROR);
        let stack = report.stack.unwrap();
        assert!(stack.contains("caused by: disk on fire"));
    }

    #[test]
    fn route_not_found_names_method_and_path() {
        let err = AppError::RouteNotFound {
            method: "GET".to_string(),
            path: "/nope".to_string(),
        };

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Route GET /nope not found");
        assert!(err.stack().is_none());
    }

    #[test]
    fn into_response_carries_report() {
        let response = AppError::operational(StatusCode::CONFLICT, "busy").into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "busy");
    }
}
