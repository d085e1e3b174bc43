use axum::extract::OriginalUri;
use axum::http::Method;

use crate::error::AppError;

/// Router fallback for paths no route matched.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
