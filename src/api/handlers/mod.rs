//! REST endpoint handlers organized by resource.

pub mod journal;
pub mod system;
pub mod task;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};

use crate::app_state::AppState;
use crate::error::ApiError;

/// Composes all bearer-gated resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(task::routes())
        .merge(journal::routes())
}

/// Resolves an integer path id. A non-integer id addresses nothing, so it
/// is reported as `not_found`.
fn path_id(
    path: Result<Path<i64>, PathRejection>,
    not_found: ApiError,
) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| not_found)
}

/// Unwraps a JSON body, turning extractor failures into a 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::MalformedInput(rejection.body_text()))
}
