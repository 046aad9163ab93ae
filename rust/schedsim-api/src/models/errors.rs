//! Unified API error type
//!
//! Maps core errors onto HTTP statuses; serialized as `{code, message}`.
//! Anything the caller can fix (bad input, bad policy configuration) is a
//! 422; engine invariant violations surface as 500.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schedsim_core::SimError;
use serde::{Deserialize, Serialize};

/// Unified API error type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a request-validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Convert to HTTP status code
    pub fn to_http_status(&self) -> StatusCode {
        match self.code.as_str() {
            "VALIDATION_ERROR" | "UNSUPPORTED_ALGORITHM" | "POLICY_CONFIG" => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<SimError> for ApiError {
    fn from(err: SimError) -> Self {
        match err {
            SimError::Validation(msg) => ApiError::new("VALIDATION_ERROR", msg),
            SimError::UnsupportedAlgorithm(name) => ApiError::new(
                "UNSUPPORTED_ALGORITHM",
                format!("Unsupported algorithm: {}", name),
            ),
            SimError::PolicyConfig(msg) => ApiError::new("POLICY_CONFIG", msg),
            SimError::Incomplete(pid) => ApiError::new(
                "INTERNAL_ERROR",
                format!("Process {} did not complete", pid),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.to_http_status();
        (status, Json(self)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_unprocessable() {
        let err: ApiError = SimError::Validation("bad".to_string()).into();
        assert_eq!(err.to_http_status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn invariant_violations_are_internal() {
        let err: ApiError = SimError::Incomplete("P1".to_string()).into();
        assert_eq!(err.to_http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Process P1 did not complete");
    }
}
