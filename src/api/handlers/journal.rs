//! Journal entry handlers: list, create, partial update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use super::{json_body, path_id};
use crate::api::dto::{
    CreateJournalEntryRequest, DeleteResponse, JournalEntryDto, JournalListResponse,
    UpdateJournalEntryRequest,
};
use crate::app_state::AppState;
use crate::domain::{JournalEntryPatch, NewJournalEntry};
use crate::error::{ApiError, ErrorResponse};

/// `GET /api/journal` — List entries, newest first.
///
/// # Errors
///
/// Returns [`ApiError::Store`] on database failure.
#[utoipa::path(
    get,
    path = "/api/journal",
    tag = "Journal",
    summary = "List journal entries",
    description = "Returns every entry ordered by creation time, newest first.",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All entries", body = JournalListResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
    )
)]
pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let entries: Vec<JournalEntryDto> = state
        .store
        .list_entries()
        .await?
        .into_iter()
        .map(JournalEntryDto::from)
        .collect();
    Ok(Json(JournalListResponse { entries }))
}

/// `POST /api/journal` — Create an entry.
///
/// # Errors
///
/// Returns [`ApiError::MalformedInput`] if `title` or `content` is missing.
#[utoipa::path(
    post,
    path = "/api/journal",
    tag = "Journal",
    summary = "Create a journal entry",
    security(("bearer_auth" = [])),
    request_body = CreateJournalEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = JournalEntryDto),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateJournalEntryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;
    let entry = NewJournalEntry::new(req.title, req.content)?;
    let record = state.store.insert_entry(entry).await?;
    tracing::info!(entry_id = record.id, "journal entry created");
    Ok((StatusCode::CREATED, Json(JournalEntryDto::from(record))))
}

/// `PUT /api/journal/{id}` — Partially update an entry.
///
/// # Errors
///
/// Returns [`ApiError::EntryNotFound`] if the entry does not exist and
/// [`ApiError::MalformedInput`] for an invalid body or blank title.
#[utoipa::path(
    put,
    path = "/api/journal/{id}",
    tag = "Journal",
    summary = "Update a journal entry",
    description = "Replaces `title` and/or `content`; omitted fields keep their current value.",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Entry id"),
    ),
    request_body = UpdateJournalEntryRequest,
    responses(
        (status = 200, description = "Updated entry", body = JournalEntryDto),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
    )
)]
pub async fn update_entry(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateJournalEntryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path, ApiError::EntryNotFound)?;
    let mut record = state
        .store
        .get_entry(id)
        .await?
        .ok_or(ApiError::EntryNotFound)?;
    let req = json_body(payload)?;

    let patch = JournalEntryPatch::new(req.title, req.content)?;
    let (title, content) = patch.apply(record.title, record.content);
    record.title = title;
    record.content = content;

    if !state.store.update_entry(&record).await? {
        return Err(ApiError::EntryNotFound);
    }
    tracing::info!(entry_id = id, "journal entry updated");
    Ok(Json(JournalEntryDto::from(record)))
}

/// `DELETE /api/journal/{id}` — Delete an entry.
///
/// Tasks linked to the entry keep their `journal_entry_id`.
///
/// # Errors
///
/// Returns [`ApiError::EntryNotFound`] if the entry does not exist.
#[utoipa::path(
    delete,
    path = "/api/journal/{id}",
    tag = "Journal",
    summary = "Delete a journal entry",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Entry id"),
    ),
    responses(
        (status = 200, description = "Entry deleted", body = DeleteResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
    )
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path, ApiError::EntryNotFound)?;
    if !state.store.delete_entry(id).await? {
        return Err(ApiError::EntryNotFound);
    }
    tracing::info!(entry_id = id, "journal entry deleted");
    Ok(Json(DeleteResponse::new("Entry deleted")))
}

/// Journal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal", get(list_entries).post(create_entry))
        .route("/journal/{id}", put(update_entry).delete(delete_entry))
}
