pub mod health;
pub mod system;

use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Current UTC time as an ISO-8601 string with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Success envelope wrapping a `data` document.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: String,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: timestamp(),
        }
    }
}

/// Failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(error: ErrorBody) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    pub status_code: u16,
    pub timestamp: String,
    pub path: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorBody {
    pub fn new(message: String, status: StatusCode, path: String, method: String) -> Self {
        Self {
            message,
            status_code: status.as_u16(),
            timestamp: timestamp(),
            path,
            method,
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn error_body_uses_camel_case_and_omits_missing_stack() {
        let body = ErrorBody::new(
            "Route GET /nope not found".to_string(),
            StatusCode::NOT_FOUND,
            "/nope".to_string(),
            "GET".to_string(),
        );
        let value = serde_json::to_value(ErrorResponse::new(body)).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["statusCode"], json!(404));
        assert_eq!(value["error"]["path"], json!("/nope"));
        assert!(value["error"].get("stack").is_none());
    }

    #[test]
    fn data_response_wraps_payload() {
        let value = serde_json::to_value(DataResponse::new(json!({ "answer": 42 }))).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["answer"], json!(42));
        assert!(value["timestamp"].is_string());
    }
}
