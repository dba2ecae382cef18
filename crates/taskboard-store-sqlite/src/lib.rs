//! SQLite-backed task collection for taskboard.

mod error;

pub use error::StoreError;

use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use taskboard_core::{Priority, Task, TaskFilter, TaskId, TaskPatch, TaskStatus};
use tracing::{debug, info};

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

const TASK_COLUMNS: &str = "id, title, description, category, priority, status, is_deleted";

/// Single `tasks` collection stored in a SQLite database.
///
/// Every mutation is one SQL statement (or one statement plus a read-back)
/// executed under the connection lock, so each operation is atomic with
/// respect to a single record.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file and apply the schema.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema is newer than supported.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let store = Self::bootstrap(conn)?;
        info!(path = %path.display(), "opened task store");
        Ok(store)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self::bootstrap(conn)?;
        info!("opened in-memory task store");
        Ok(store)
    }

    fn bootstrap(mut conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if found > SCHEMA_VERSION {
            return Err(StoreError::UnsupportedSchemaVersion {
                found,
                supported: SCHEMA_VERSION,
            });
        }
        if found < SCHEMA_VERSION {
            let tx = conn.transaction()?;
            tx.execute_batch(SCHEMA_SQL)?;
            tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
            tx.commit()?;
        }
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockError)
    }

    /// Insert a new record.
    ///
    /// # Errors
    /// Returns an error if the write fails (including a duplicate id).
    pub fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO tasks (id, title, description, category, priority, status, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.id.to_string(),
                task.title,
                task.description,
                task.category,
                task.priority.map(Priority::as_str),
                task.status.as_str(),
                task.is_deleted,
            ],
        )?;
        debug!(task = %task.id, "inserted task");
        Ok(())
    }

    /// List non-deleted records matching `filter`, in insertion order.
    ///
    /// # Errors
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE is_deleted = 0
               AND (?1 IS NULL OR status = ?1)
               AND (?2 IS NULL OR priority = ?2)
               AND (?3 IS NULL OR category = ?3)
             ORDER BY seq;"
        ))?;
        let rows = stmt.query_map(
            params![filter.status, filter.priority, filter.category],
            read_row,
        )?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(decode(row?)?);
        }
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Fetch a record by id, deleted or not.
    ///
    /// # Errors
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let conn = self.lock()?;
        fetch(&conn, id)
    }

    /// Apply `patch` to the record when it exists, is not deleted and at least
    /// one supplied field differs from the stored value.
    ///
    /// Returns the updated record, or `None` when nothing was modified.
    ///
    /// # Errors
    /// Returns an error if the statement fails.
    pub fn update_active(&self, id: TaskId, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        if patch.is_empty() {
            return Ok(None);
        }
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let modified = tx.execute(
            "UPDATE tasks SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                category = COALESCE(?4, category),
                priority = COALESCE(?5, priority),
                status = COALESCE(?6, status)
             WHERE id = ?1
               AND is_deleted = 0
               AND ((?2 IS NOT NULL AND title IS NOT ?2)
                 OR (?3 IS NOT NULL AND description IS NOT ?3)
                 OR (?4 IS NOT NULL AND category IS NOT ?4)
                 OR (?5 IS NOT NULL AND priority IS NOT ?5)
                 OR (?6 IS NOT NULL AND status IS NOT ?6));",
            params![
                id.to_string(),
                patch.title,
                patch.description,
                patch.category,
                patch.priority.map(Priority::as_str),
                patch.status.map(TaskStatus::as_str),
            ],
        )?;
        if modified == 0 {
            debug!(task = %id, "update matched nothing");
            return Ok(None);
        }
        let updated = fetch(&tx, id)?;
        tx.commit()?;
        debug!(task = %id, "updated task");
        Ok(updated)
    }

    /// Set the soft-delete marker.
    ///
    /// Returns `true` only when the marker actually changed, so deleting an
    /// already deleted record reports `false`.
    ///
    /// # Errors
    /// Returns an error if the statement fails.
    pub fn mark_deleted(&self, id: TaskId) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let modified = conn.execute(
            "UPDATE tasks SET is_deleted = 1 WHERE id = ?1 AND is_deleted = 0;",
            params![id.to_string()],
        )?;
        debug!(task = %id, modified, "soft delete");
        Ok(modified > 0)
    }
}

struct RawTask {
    id: String,
    title: String,
    description: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    status: String,
    is_deleted: bool,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawTask> {
    Ok(RawTask {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        priority: row.get(4)?,
        status: row.get(5)?,
        is_deleted: row.get(6)?,
    })
}

fn decode(raw: RawTask) -> Result<Task, StoreError> {
    let id = TaskId::from_str(&raw.id)
        .map_err(|err| StoreError::InvalidData(format!("task id '{}': {err}", raw.id)))?;
    let status = TaskStatus::from_str(&raw.status)
        .map_err(|err| StoreError::InvalidData(format!("task {id}: {err}")))?;
    let priority = raw
        .priority
        .as_deref()
        .map(Priority::from_str)
        .transpose()
        .map_err(|err| StoreError::InvalidData(format!("task {id}: {err}")))?;
    Ok(Task {
        id,
        title: raw.title,
        description: raw.description,
        category: raw.category,
        priority,
        status,
        is_deleted: raw.is_deleted,
    })
}

fn fetch(conn: &Connection, id: TaskId) -> Result<Option<Task>, StoreError> {
    let raw = conn
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1;"),
            params![id.to_string()],
            read_row,
        )
        .optional()?;
    raw.map(decode).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::NewTask;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap_or_else(|err| panic!("must open store: {err}"))
    }

    fn insert(store: &SqliteStore, new: NewTask) -> Task {
        let task = Task::from_new(TaskId::new(), new);
        store
            .insert(&task)
            .unwrap_or_else(|err| panic!("must insert: {err}"));
        task
    }

    #[test]
    fn insert_then_get_roundtrips_all_fields() {
        let store = store();
        let task = insert(
            &store,
            NewTask::new("Buy milk")
                .with_description("2 litres")
                .with_category("shopping")
                .with_priority(Priority::High)
                .with_status(TaskStatus::InProgress),
        );
        let loaded = store
            .get(task.id)
            .unwrap_or_else(|err| panic!("must get: {err}"));
        assert_eq!(loaded, Some(task));
    }

    #[test]
    fn update_reports_nothing_when_values_are_equal() {
        let store = store();
        let task = insert(&store, NewTask::new("Same"));
        let patch = TaskPatch {
            title: Some("Same".into()),
            status: Some(TaskStatus::Pending),
            ..TaskPatch::default()
        };
        let result = store
            .update_active(task.id, &patch)
            .unwrap_or_else(|err| panic!("must run update: {err}"));
        assert!(result.is_none());
    }

    #[test]
    fn update_sets_previously_missing_optional_field() {
        let store = store();
        let task = insert(&store, NewTask::new("No category"));
        let patch = TaskPatch {
            category: Some("work".into()),
            ..TaskPatch::default()
        };
        let updated = store
            .update_active(task.id, &patch)
            .unwrap_or_else(|err| panic!("must run update: {err}"))
            .unwrap_or_else(|| panic!("category change must modify the record"));
        assert_eq!(updated.category.as_deref(), Some("work"));
        assert_eq!(updated.title, "No category");
    }

    #[test]
    fn mark_deleted_only_reports_first_change() {
        let store = store();
        let task = insert(&store, NewTask::new("Temp"));
        assert!(store.mark_deleted(task.id).unwrap_or_else(|err| panic!("{err}")));
        assert!(!store.mark_deleted(task.id).unwrap_or_else(|err| panic!("{err}")));
        assert!(!store.mark_deleted(TaskId::new()).unwrap_or_else(|err| panic!("{err}")));
    }
}
