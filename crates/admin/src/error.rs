//! Unified error handling for the admin backend.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use guava_core::ApiResponse;

use crate::store::RepositoryError;

/// Application-level error type for request handling.
///
/// Every variant renders as the `{success: false, message}` envelope; the
/// variant determines the HTTP status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required field missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation targets a nonexistent entity. The payload is the entity
    /// kind name as shown to clients, e.g. `"Product"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique-constraint violation (profile email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(RepositoryError),

    /// Writing an uploaded blob failed.
    #[error("Upload error: {0}")]
    Upload(#[from] std::io::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose store internals to clients
        let message = match &self {
            Self::Validation(msg) | Self::Conflict(msg) => msg.clone(),
            Self::NotFound(kind) => format!("{kind} not found"),
            Self::Store(_) | Self::Upload(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
