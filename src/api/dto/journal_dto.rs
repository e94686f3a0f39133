//! Journal entry DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::JournalEntryRecord;

/// Request body for `POST /api/journal`. Both fields are required.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateJournalEntryRequest {
    /// Entry title.
    #[serde(default)]
    pub title: Option<String>,
    /// Entry body.
    #[serde(default)]
    pub content: Option<String>,
}

/// Request body for `PUT /api/journal/{id}`. Omitted fields are kept.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateJournalEntryRequest {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement body.
    #[serde(default)]
    pub content: Option<String>,
}

/// Journal entry as returned by every journal endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalEntryDto {
    /// Entry identifier.
    pub id: i64,
    /// Entry title.
    pub title: String,
    /// Entry body.
    pub content: String,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

impl From<JournalEntryRecord> for JournalEntryDto {
    fn from(record: JournalEntryRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            created_at: record.created_at,
        }
    }
}

/// Response body for `GET /api/journal`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JournalListResponse {
    /// All entries, newest first.
    pub entries: Vec<JournalEntryDto>,
}
