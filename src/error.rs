//! Error types for the Span Annotator server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::annotations::AnnotationError;
use crate::session::RegistryError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Annotation rejected: {0}")]
    Annotation(#[from] AnnotationError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn session_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Session '{}' not found", id))
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Annotation(e) => {
                tracing::debug!("Annotation rejected: {}", e);
                let error_type = match e {
                    AnnotationError::InvalidSelection(_) => "invalid_selection",
                    AnnotationError::DuplicateId(_) => "duplicate_id",
                    AnnotationError::CommitDisabled => "commit_disabled",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, error_type, e.to_string())
            }
            AppError::Registry(e) => {
                tracing::warn!("Registry error: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "session_limit", e.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::SelectionFault;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::session_not_found("x"), StatusCode::NOT_FOUND),
            (AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                AppError::from(AnnotationError::InvalidSelection(SelectionFault::Missing)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(RegistryError::Full(1)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
