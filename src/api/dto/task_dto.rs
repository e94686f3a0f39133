//! Task DTOs for list, create and update operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::deserialize_optional_id;
use crate::persistence::TaskRecord;

/// Request body for `POST /api/tasks`.
///
/// Every field is optional at the wire level so a missing `text` can be
/// reported as a structured 400 instead of a deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Task description (required).
    #[serde(default)]
    pub text: Option<String>,
    /// Deadline: RFC 3339, naive date-time or `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Category tag; defaults to `"general"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Journal entry to link, as integer or numeric string.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    #[schema(value_type = Option<i64>)]
    pub journal_entry_id: Option<i64>,
}

/// Request body for `PUT /api/tasks/{id}`. Other fields are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    /// New completion progress, `0..=100`.
    #[serde(default)]
    pub percentage: Option<i64>,
}

/// Task as returned by every task endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskDto {
    /// Task identifier.
    pub id: i64,
    /// Task description.
    pub text: String,
    /// Completion progress.
    pub percentage: i64,
    /// Deadline (UTC) or `null`.
    pub due_date: Option<DateTime<Utc>>,
    /// Category tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Linked journal entry id or `null`.
    pub journal_entry_id: Option<i64>,
    /// Title of the linked entry; the key is omitted when there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_entry_title: Option<String>,
}

impl From<TaskRecord> for TaskDto {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            percentage: record.percentage,
            due_date: record.due_date,
            kind: record.kind,
            journal_entry_id: record.journal_entry_id,
            journal_entry_title: record.journal_entry_title,
        }
    }
}

/// Response body for `GET /api/tasks`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskListResponse {
    /// All tasks by ascending id.
    pub tasks: Vec<TaskDto>,
}
