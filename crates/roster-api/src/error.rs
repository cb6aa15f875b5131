//! Error handling for the HTTP API.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::envelope::ApiResponse;

/// Message used when a route id is not a non-negative integer.
pub const INVALID_ID: &str = "Validation failed (numeric string is expected)";

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request; answered with 400.
    #[error("Bad request: {0}")]
    Validation(String),

    /// Missing permission; answered with 403.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Missing record or route; answered with 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Anything else; answered with 500.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<roster_core::Error> for ApiError {
    fn from(err: roster_core::Error) -> Self {
        use roster_core::Error;

        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Forbidden(msg) => ApiError::Forbidden(msg),
            Error::Validation(msg) | Error::Serialization(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::Validation(INVALID_ID.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self.message());
        } else {
            tracing::debug!(code = self.error_code(), status = status.as_u16(), "{}", self.message());
        }

        let body = ApiResponse::<()>::failure(vec![self.message().to_string()]);
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::Error;

    #[test]
    fn test_core_error_mapping() {
        let not_found: ApiError = Error::not_found("User not found").into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message(), "User not found");

        let forbidden: ApiError = Error::forbidden("nope").into();
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

        let invalid: ApiError = Error::validation("bad").into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let config: ApiError = Error::config("broken").into();
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Forbidden("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
