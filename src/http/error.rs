//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::SlotError;
use crate::services::overlap::OverlapError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Operation requires a relation the caller does not have
    Forbidden(String),
    /// Write collides with existing state
    Conflict(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::new("CONFLICT", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AppError::NotFound(msg),
            RepositoryError::Conflict(msg) => AppError::Conflict(msg),
            RepositoryError::ValidationError(msg) => AppError::BadRequest(msg),
            RepositoryError::ConnectionError(msg) | RepositoryError::InternalError(msg) => {
                AppError::Internal(msg)
            }
        }
    }
}

impl From<OverlapError> for AppError {
    fn from(err: OverlapError) -> Self {
        match err {
            OverlapError::UserNotFound(_) => AppError::NotFound(err.to_string()),
            OverlapError::NoMatchRelation(_, _) => AppError::Forbidden(err.to_string()),
            OverlapError::InvalidTimezone { .. } => AppError::BadRequest(err.to_string()),
            OverlapError::Repository(e) => e.into(),
        }
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::OverlapConflict { .. } => AppError::Conflict(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        let app: AppError = RepositoryError::NotFound("x".into()).into();
        assert!(matches!(app, AppError::NotFound(_)));

        let app: AppError = RepositoryError::Conflict("x".into()).into();
        assert!(matches!(app, AppError::Conflict(_)));

        let app: AppError = RepositoryError::ValidationError("x".into()).into();
        assert!(matches!(app, AppError::BadRequest(_)));
    }

    #[test]
    fn test_overlap_error_mapping() {
        let app: AppError = OverlapError::NoMatchRelation("a".into(), "b".into()).into();
        assert!(matches!(app, AppError::Forbidden(_)));

        let app: AppError = OverlapError::UserNotFound("ghost".into()).into();
        assert!(matches!(app, AppError::NotFound(_)));
    }
}
