//! SQLite implementation of the persistence layer.

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::models::{JournalEntryRecord, TaskRecord};
use crate::config::AppConfig;
use crate::domain::{NewJournalEntry, NewTask, Percentage};
use crate::error::ApiError;

const LIST_TASKS: &str = "SELECT t.id, t.text, t.percentage, t.due_date, t.type AS kind, \
     t.journal_entry_id, j.title AS journal_entry_title \
     FROM task t LEFT JOIN journal_entry j ON j.id = t.journal_entry_id \
     ORDER BY t.id ASC";

const GET_TASK: &str = "SELECT t.id, t.text, t.percentage, t.due_date, t.type AS kind, \
     t.journal_entry_id, j.title AS journal_entry_title \
     FROM task t LEFT JOIN journal_entry j ON j.id = t.journal_entry_id \
     WHERE t.id = ?";

const ENTRY_EXISTS: &str = "SELECT COUNT(*) FROM journal_entry WHERE id = ?";

const UPDATE_ENTRY: &str = "UPDATE journal_entry SET title = ?, content = ? WHERE id = ?";

/// SQLite-backed store using `sqlx::SqlitePool`.
///
/// Every method issues a single statement; writes commit on their own.
/// Foreign keys are declared in the schema but not enforced, so deleting
/// a journal entry leaves linked tasks pointing at the old id. Ids are
/// `AUTOINCREMENT` and never handed out twice, so such a link can't be
/// picked up by a later entry.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the configured database and applies the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] if the URL is invalid or the database
    /// cannot be opened, and [`ApiError::Migration`] if the schema cannot
    /// be applied.
    pub async fn connect(config: &AppConfig) -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        tracing::info!(url = %config.database_url, "database ready");
        Ok(store)
    }

    /// Opens a private in-memory database with the schema applied.
    ///
    /// The pool holds exactly one connection that never expires, since
    /// each SQLite memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the connection or migration fails.
    pub async fn in_memory() -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Applies the migrations under `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Migration`] on failure.
    pub async fn migrate(&self) -> Result<(), ApiError> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    // ── Tasks ──────────────────────────────────────────────────────────

    /// Lists all tasks by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>, ApiError> {
        let rows = sqlx::query_as::<_, TaskRecord>(LIST_TASKS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetches one task with its entry title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn get_task(&self, id: i64) -> Result<Option<TaskRecord>, ApiError> {
        let row = sqlx::query_as::<_, TaskRecord>(GET_TASK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Inserts a task with zero progress and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn insert_task(&self, task: &NewTask) -> Result<i64, ApiError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO task (text, percentage, due_date, type, journal_entry_id) \
             VALUES (?, 0, ?, ?, ?) RETURNING id",
        )
        .bind(&task.text)
        .bind(task.due_date)
        .bind(&task.kind)
        .bind(task.journal_entry_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Sets a task's progress. Returns `false` if no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn set_task_percentage(
        &self,
        id: i64,
        percentage: Percentage,
    ) -> Result<bool, ApiError> {
        let result = sqlx::query("UPDATE task SET percentage = ? WHERE id = ?")
            .bind(i64::from(percentage.get()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-deletes a task. Returns `false` if no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn delete_task(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM task WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Journal entries ────────────────────────────────────────────────

    /// Lists all entries, newest first. Ties fall back to descending id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn list_entries(&self) -> Result<Vec<JournalEntryRecord>, ApiError> {
        let rows = sqlx::query_as::<_, JournalEntryRecord>(
            "SELECT id, title, content, created_at FROM journal_entry \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn get_entry(&self, id: i64) -> Result<Option<JournalEntryRecord>, ApiError> {
        let row = sqlx::query_as::<_, JournalEntryRecord>(
            "SELECT id, title, content, created_at FROM journal_entry WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns `true` if an entry with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn entry_exists(&self, id: i64) -> Result<bool, ApiError> {
        let count = sqlx::query_scalar::<_, i64>(ENTRY_EXISTS)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Inserts an entry stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn insert_entry(
        &self,
        entry: NewJournalEntry,
    ) -> Result<JournalEntryRecord, ApiError> {
        let created_at = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO journal_entry (title, content, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(JournalEntryRecord {
            id,
            title: entry.title,
            content: entry.content,
            created_at,
        })
    }

    /// Overwrites an entry's title and content.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn update_entry(&self, entry: &JournalEntryRecord) -> Result<bool, ApiError> {
        let result = sqlx::query(UPDATE_ENTRY)
            .bind(&entry.title)
            .bind(&entry.content)
            .bind(entry.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-deletes an entry. Linked tasks are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] on database failure.
    pub async fn delete_entry(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM journal_entry WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn make_store() -> SqliteStore {
        let Ok(store) = SqliteStore::in_memory().await else {
            panic!("in-memory store should open");
        };
        store
    }

    fn new_task(text: &str, journal_entry_id: Option<i64>) -> NewTask {
        let text = Some(text.to_string());
        let Ok(task) = NewTask::new(text, None, None, journal_entry_id) else {
            panic!("valid task");
        };
        task
    }

    fn new_entry(title: &str) -> NewJournalEntry {
        let Ok(entry) = NewJournalEntry::new(Some(title.to_string()), Some("body".to_string()))
        else {
            panic!("valid entry");
        };
        entry
    }

    #[tokio::test]
    async fn inserted_task_has_defaults() {
        let store = make_store().await;
        let Ok(id) = store.insert_task(&new_task("Review", None)).await else {
            panic!("insert failed");
        };
        let Ok(Some(task)) = store.get_task(id).await else {
            panic!("task missing");
        };
        assert_eq!(task.percentage, 0);
        assert_eq!(task.kind, "general");
        assert_eq!(task.due_date, None);
        assert_eq!(task.journal_entry_title, None);
    }

    #[tokio::test]
    async fn tasks_list_in_id_order_with_titles() {
        let store = make_store().await;
        let Ok(entry) = store.insert_entry(new_entry("Day 1")).await else {
            panic!("entry insert failed");
        };
        for (text, link) in [("a", None), ("b", Some(entry.id)), ("c", None)] {
            let Ok(_) = store.insert_task(&new_task(text, link)).await else {
                panic!("insert failed");
            };
        }

        let Ok(tasks) = store.list_tasks().await else {
            panic!("list failed");
        };
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);

        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
        let titles: Vec<Option<&str>> = tasks
            .iter()
            .map(|t| t.journal_entry_title.as_deref())
            .collect();
        assert_eq!(titles, [None, Some("Day 1"), None]);
    }

    #[tokio::test]
    async fn percentage_update_touches_nothing_else() {
        let store = make_store().await;
        let Ok(id) = store.insert_task(&new_task("x", None)).await else {
            panic!("insert failed");
        };
        let Ok(Some(before)) = store.get_task(id).await else {
            panic!("task missing");
        };
        let Ok(pct) = Percentage::new(60) else {
            panic!("valid percentage");
        };
        assert!(matches!(store.set_task_percentage(id, pct).await, Ok(true)));

        let Ok(Some(after)) = store.get_task(id).await else {
            panic!("task missing");
        };
        assert_eq!(after.percentage, 60);
        assert_eq!(after.text, before.text);
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.due_date, before.due_date);
        assert_eq!(after.journal_entry_id, before.journal_entry_id);
    }

    #[tokio::test]
    async fn missing_rows_report_false() {
        let store = make_store().await;
        let Ok(pct) = Percentage::new(10) else {
            panic!("valid percentage");
        };
        assert!(matches!(store.set_task_percentage(99, pct).await, Ok(false)));
        assert!(matches!(store.delete_task(99).await, Ok(false)));
        assert!(matches!(store.delete_entry(99).await, Ok(false)));
        assert!(matches!(store.get_entry(99).await, Ok(None)));
        assert!(matches!(store.entry_exists(99).await, Ok(false)));
    }

    #[tokio::test]
    async fn entries_list_newest_first() {
        let store = make_store().await;
        for title in ["first", "second", "third"] {
            let Ok(_) = store.insert_entry(new_entry(title)).await else {
                panic!("insert failed");
            };
        }
        let Ok(entries) = store.list_entries().await else {
            panic!("list failed");
        };
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn created_at_is_per_insert() {
        let store = make_store().await;
        let Ok(a) = store.insert_entry(new_entry("a")).await else {
            panic!("insert failed");
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        let Ok(b) = store.insert_entry(new_entry("b")).await else {
            panic!("insert failed");
        };
        assert!(b.created_at > a.created_at);
    }

    #[tokio::test]
    async fn deleting_entry_orphans_linked_tasks() {
        let store = make_store().await;
        let Ok(entry) = store.insert_entry(new_entry("Day 1")).await else {
            panic!("entry insert failed");
        };
        let Ok(task_id) = store.insert_task(&new_task("linked", Some(entry.id))).await else {
            panic!("task insert failed");
        };

        assert!(matches!(store.delete_entry(entry.id).await, Ok(true)));

        let Ok(Some(task)) = store.get_task(task_id).await else {
            panic!("task should survive");
        };
        assert_eq!(task.journal_entry_id, Some(entry.id));
        assert_eq!(task.journal_entry_title, None);
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reassigned() {
        let store = make_store().await;
        let Ok(old) = store.insert_entry(new_entry("old")).await else {
            panic!("entry insert failed");
        };
        let Ok(task_id) = store.insert_task(&new_task("linked", Some(old.id))).await else {
            panic!("task insert failed");
        };
        assert!(matches!(store.delete_entry(old.id).await, Ok(true)));
        assert!(matches!(store.delete_task(task_id).await, Ok(true)));

        let Ok(fresh) = store.insert_entry(new_entry("unrelated")).await else {
            panic!("entry insert failed");
        };
        let Ok(next_task_id) = store.insert_task(&new_task("next", None)).await else {
            panic!("task insert failed");
        };
        assert!(fresh.id > old.id);
        assert!(next_task_id > task_id);
    }

    #[tokio::test]
    async fn update_entry_persists() {
        let store = make_store().await;
        let Ok(mut entry) = store.insert_entry(new_entry("old")).await else {
            panic!("insert failed");
        };
        entry.title = "new".to_string();
        assert!(matches!(store.update_entry(&entry).await, Ok(true)));
        let Ok(Some(stored)) = store.get_entry(entry.id).await else {
            panic!("entry missing");
        };
        assert_eq!(stored.title, "new");
        assert_eq!(stored.content, "body");
        assert_eq!(stored.created_at, entry.created_at);
    }
}
