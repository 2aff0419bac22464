//! Unified error handling for the HTTP surface.
//!
//! Route handlers return `Result<T, AppError>`. The response mapping is the
//! only place the domain taxonomy meets HTTP statuses; handlers themselves
//! never construct status codes for errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use supermarket_core::Error as CoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A domain operation failed (validation, lookup, policy, cart state,
    /// storage).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session could not be read or written.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Core(err) => match err {
                CoreError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                CoreError::AccessDenied(_) => (StatusCode::FORBIDDEN, err.to_string()),
                CoreError::EmptyCart => (StatusCode::CONFLICT, err.to_string()),
                CoreError::Storage(_) => {
                    tracing::error!(error = %err, "Request error");
                    // Don't expose internal error details to clients
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_string(),
                    )
                }
            },
            Self::Session(err) => {
                tracing::error!(error = %err, "Session error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
