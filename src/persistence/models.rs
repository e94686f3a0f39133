//! Database models for tasks and journal entries.

use chrono::{DateTime, Utc};

/// A task row from the `task` table, joined with its entry's title.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TaskRecord {
    /// Row ID assigned by the store.
    pub id: i64,
    /// Task description.
    pub text: String,
    /// Completion progress, `0..=100`.
    pub percentage: i64,
    /// Optional deadline (UTC).
    pub due_date: Option<DateTime<Utc>>,
    /// Category tag, stored in the `type` column.
    pub kind: String,
    /// Linked journal entry, if any.
    pub journal_entry_id: Option<i64>,
    /// Title of the linked entry; `None` when unlinked or dangling.
    pub journal_entry_title: Option<String>,
}

/// A row from the `journal_entry` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct JournalEntryRecord {
    /// Row ID assigned by the store.
    pub id: i64,
    /// Entry title.
    pub title: String,
    /// Entry body.
    pub content: String,
    /// Insertion timestamp (UTC), set once per row.
    pub created_at: DateTime<Utc>,
}
