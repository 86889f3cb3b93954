//! Standard response envelope
//!
//! Every JSON body the API returns has the same shape:
//!
//! ```json
//! { "success": true, "message": "...", "data": { ... } }
//! ```
//!
//! Failures set `success` to false, leave `data` null, and may carry an
//! `errors` array with per-field details.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::core::error::FieldValidationError;

/// Envelope wrapping every JSON body
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,

    /// Machine-readable error code, only on failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldValidationError>>,

    #[serde(skip)]
    status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::success(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::success(StatusCode::CREATED, message, data)
    }

    fn success(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            code: None,
            errors: None,
            status,
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code: None,
            errors: None,
            status,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_errors(mut self, errors: Option<Vec<FieldValidationError>>) -> Self {
        self.errors = errors.filter(|e| !e.is_empty());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let resp = ApiResponse::ok("Fetched", json!({ "id": 1 }));
        assert_eq!(resp.status(), StatusCode::OK);

        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Fetched");
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("errors").is_none());
        assert!(body.get("code").is_none());
    }

    #[test]
    fn test_created_status() {
        let resp = ApiResponse::created("Created", ());
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_empty_errors_are_omitted() {
        let resp = ApiResponse::<()>::failure(StatusCode::BAD_REQUEST, "bad").with_errors(Some(vec![]));
        let body = serde_json::to_value(&resp).unwrap();
        assert!(body.get("errors").is_none());
        assert_eq!(body["success"], false);
    }
}
