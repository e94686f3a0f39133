//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Client-facing
//! variants map to a status code and a flat JSON body; store failures map
//! to a bare 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All client-facing error responses follow this shape:
/// ```json
/// { "error": "Task not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant          | HTTP Status                |
/// |------------------|----------------------------|
/// | `Unauthorized`   | 401 Unauthorized           |
/// | `TaskNotFound`   | 404 Not Found              |
/// | `EntryNotFound`  | 404 Not Found              |
/// | `MalformedInput` | 400 Bad Request            |
/// | `Store`          | 500 Internal Server Error  |
/// | `Migration`      | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or incorrect bearer credential.
    #[error("Unauthorized")]
    Unauthorized,

    /// No task with the requested id.
    #[error("Task not found")]
    TaskNotFound,

    /// No journal entry with the requested id.
    #[error("Entry not found")]
    EntryNotFound,

    /// A required field is missing or a value failed validation.
    #[error("{0}")]
    MalformedInput(String),

    /// Query or connection failure reported by the store.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Schema bootstrap failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl ApiError {
    /// Shorthand for a [`ApiError::MalformedInput`] naming a missing field.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::MalformedInput(format!("missing required field: {field}"))
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::TaskNotFound | Self::EntryNotFound => StatusCode::NOT_FOUND,
            Self::MalformedInput(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            return status.into_response();
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}
