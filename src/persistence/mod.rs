//! Persistence layer: SQLite tables for tasks and journal entries.
//!
//! The concrete store uses `sqlx::SqlitePool` for async access. The
//! schema lives in `migrations/` and is applied on startup.

pub mod models;
pub mod sqlite;

pub use models::{JournalEntryRecord, TaskRecord};
pub use sqlite::SqliteStore;
