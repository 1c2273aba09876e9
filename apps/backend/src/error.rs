//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use korean_learner_core::CoreError;
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::services::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::AuthenticationFailed(_) => (StatusCode::UNAUTHORIZED, "authentication_failed"),
            ApiError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid_argument"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::StorageUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            CoreError::CardNotFound(id) => ApiError::NotFound(format!("card {}", id)),
            CoreError::SessionFinished => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::warn!(error = %err, "collection store failure");
        match err {
            StoreError::Unavailable(msg) => ApiError::StorageUnavailable(msg),
            StoreError::Serialization(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::AuthenticationFailed(err.to_string())
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failed_status() {
        let error = ApiError::AuthenticationFailed("invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("card 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_argument_status() {
        let error = ApiError::InvalidArgument("quality 9".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_unavailable_status() {
        let error = ApiError::StorageUnavailable("disk full".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal("unexpected error".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_core_error() {
        let error: ApiError = CoreError::InvalidArgument("quality must be between 0 and 5".into()).into();
        assert!(matches!(error, ApiError::InvalidArgument(_)));

        let error: ApiError = CoreError::CardNotFound(42).into();
        assert_eq!(error.to_string(), "Not found: card 42");

        let error: ApiError = CoreError::SessionFinished.into();
        assert!(matches!(error, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_from_store_error() {
        let error: ApiError = StoreError::Unavailable("offline".to_string()).into();
        assert!(matches!(error, ApiError::StorageUnavailable(_)));
    }

    #[test]
    fn test_error_display_authentication_failed() {
        let error = ApiError::AuthenticationFailed("invalid token".to_string());
        assert_eq!(error.to_string(), "Authentication failed: invalid token");
    }

    #[test]
    fn test_error_display_bad_request() {
        let error = ApiError::BadRequest("missing field".to_string());
        assert_eq!(error.to_string(), "Bad request: missing field");
    }

    #[test]
    fn test_error_display_storage_unavailable() {
        let error = ApiError::StorageUnavailable("connection lost".to_string());
        assert_eq!(error.to_string(), "Storage unavailable: connection lost");
    }
}
