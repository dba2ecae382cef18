//! Error types for taskboard store operations.

use thiserror::Error;

/// Errors that can occur during `SqliteStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite returned an error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored row could not be decoded into a task.
    #[error("Invalid stored task data: {0}")]
    InvalidData(String),

    /// The database was written by a newer schema than this binary knows.
    #[error("Unsupported schema version {found} (latest supported: {supported})")]
    UnsupportedSchemaVersion {
        /// Version recorded in the database file.
        found: u32,
        /// Latest version this binary can open.
        supported: u32,
    },

    /// Failed to acquire the connection lock.
    #[error("Store lock poisoned")]
    LockError,
}
