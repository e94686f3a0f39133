//! Task handlers: list, create, update progress, delete.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use super::{json_body, path_id};
use crate::api::dto::{
    CreateTaskRequest, DeleteResponse, TaskDto, TaskListResponse, UpdateTaskRequest,
};
use crate::app_state::AppState;
use crate::domain::{NewTask, Percentage};
use crate::error::{ApiError, ErrorResponse};

/// `GET /api/tasks` — List all tasks.
///
/// # Errors
///
/// Returns [`ApiError::Store`] on database failure.
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    summary = "List tasks",
    description = "Returns every task by ascending id. Linked tasks carry the title of their journal entry.",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tasks", body = TaskListResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
    )
)]
pub async fn list_tasks(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tasks: Vec<TaskDto> = state
        .store
        .list_tasks()
        .await?
        .into_iter()
        .map(TaskDto::from)
        .collect();
    tracing::debug!(count = tasks.len(), "listed tasks");
    Ok(Json(TaskListResponse { tasks }))
}

/// `POST /api/tasks` — Create a task.
///
/// # Errors
///
/// Returns [`ApiError::MalformedInput`] on a missing `text` or invalid
/// field, and [`ApiError::EntryNotFound`] if `journal_entry_id` names no
/// entry.
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    summary = "Create a task",
    description = "Creates a task with zero progress. `type` defaults to `general`; `due_date` is stored in UTC.",
    security(("bearer_auth" = [])),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskDto),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Linked journal entry not found", body = ErrorResponse),
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;
    let task = NewTask::new(
        req.text,
        req.due_date.as_deref(),
        req.kind,
        req.journal_entry_id,
    )?;

    if let Some(entry_id) = task.journal_entry_id
        && !state.store.entry_exists(entry_id).await?
    {
        tracing::debug!(entry_id, "task links to missing journal entry");
        return Err(ApiError::EntryNotFound);
    }

    let id = state.store.insert_task(&task).await?;
    let record = state
        .store
        .get_task(id)
        .await?
        .ok_or(ApiError::TaskNotFound)?;

    tracing::info!(task_id = id, kind = %record.kind, "task created");
    Ok((StatusCode::CREATED, Json(TaskDto::from(record))))
}

/// `PUT /api/tasks/{id}` — Update a task's progress.
///
/// Only `percentage` is mutable; every other field in the body is ignored.
///
/// # Errors
///
/// Returns [`ApiError::TaskNotFound`] if the task does not exist and
/// [`ApiError::MalformedInput`] for an invalid body or out-of-range value.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    summary = "Update task progress",
    description = "Sets `percentage` when supplied and returns the full task. Other fields are immutable.",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Task id"),
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskDto),
        (status = 400, description = "Invalid percentage or body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path, ApiError::TaskNotFound)?;
    let mut record = state
        .store
        .get_task(id)
        .await?
        .ok_or(ApiError::TaskNotFound)?;
    let req = json_body(payload)?;

    if let Some(raw) = req.percentage {
        let percentage = Percentage::new(raw)?;
        if !state.store.set_task_percentage(id, percentage).await? {
            return Err(ApiError::TaskNotFound);
        }
        record.percentage = i64::from(percentage.get());
        tracing::info!(
            task_id = id,
            percentage = percentage.get(),
            "task progress updated"
        );
    }

    Ok(Json(TaskDto::from(record)))
}

/// `DELETE /api/tasks/{id}` — Delete a task.
///
/// # Errors
///
/// Returns [`ApiError::TaskNotFound`] if the task does not exist.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    summary = "Delete a task",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Task id"),
    ),
    responses(
        (status = 200, description = "Task deleted", body = DeleteResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path, ApiError::TaskNotFound)?;
    if !state.store.delete_task(id).await? {
        return Err(ApiError::TaskNotFound);
    }
    tracing::info!(task_id = id, "task deleted");
    Ok(Json(DeleteResponse::new("Task deleted")))
}

/// Task routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}
