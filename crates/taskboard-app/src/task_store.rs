//! Storage seam used by [`TaskService`](crate::service::TaskService).

use anyhow::Error;
use taskboard_core::{Task, TaskFilter, TaskId, TaskPatch};
use taskboard_store_sqlite::{SqliteStore, StoreError};

/// Minimal collection abstraction required by the service.
///
/// Each method is a single-record (or single-query) operation; implementations
/// must make every mutation atomic for the record it touches.
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Persist a new record.
    ///
    /// # Errors
    /// Returns a store-specific error when the write fails.
    fn insert(&self, task: &Task) -> Result<(), Self::Error>;

    /// List non-deleted records matching the filter in natural storage order.
    ///
    /// # Errors
    /// Returns a store-specific error when the query fails.
    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, Self::Error>;

    /// Apply a patch to an active record; `None` when nothing was modified.
    ///
    /// # Errors
    /// Returns a store-specific error when the write fails.
    fn update_active(&self, id: TaskId, patch: &TaskPatch) -> Result<Option<Task>, Self::Error>;

    /// Set the deletion marker; `true` only when it changed.
    ///
    /// # Errors
    /// Returns a store-specific error when the write fails.
    fn mark_deleted(&self, id: TaskId) -> Result<bool, Self::Error>;
}

impl TaskStore for SqliteStore {
    type Error = StoreError;

    fn insert(&self, task: &Task) -> Result<(), Self::Error> {
        Self::insert(self, task)
    }

    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, Self::Error> {
        Self::list(self, filter)
    }

    fn update_active(&self, id: TaskId, patch: &TaskPatch) -> Result<Option<Task>, Self::Error> {
        Self::update_active(self, id, patch)
    }

    fn mark_deleted(&self, id: TaskId) -> Result<bool, Self::Error> {
        Self::mark_deleted(self, id)
    }
}

impl<S> TaskStore for &S
where
    S: TaskStore + ?Sized,
{
    type Error = S::Error;

    fn insert(&self, task: &Task) -> Result<(), Self::Error> {
        (*self).insert(task)
    }

    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, Self::Error> {
        (*self).list(filter)
    }

    fn update_active(&self, id: TaskId, patch: &TaskPatch) -> Result<Option<Task>, Self::Error> {
        (*self).update_active(id, patch)
    }

    fn mark_deleted(&self, id: TaskId) -> Result<bool, Self::Error> {
        (*self).mark_deleted(id)
    }
}

impl<S> TaskStore for std::sync::Arc<S>
where
    S: TaskStore + ?Sized,
{
    type Error = S::Error;

    fn insert(&self, task: &Task) -> Result<(), Self::Error> {
        (**self).insert(task)
    }

    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, Self::Error> {
        (**self).list(filter)
    }

    fn update_active(&self, id: TaskId, patch: &TaskPatch) -> Result<Option<Task>, Self::Error> {
        (**self).update_active(id, patch)
    }

    fn mark_deleted(&self, id: TaskId) -> Result<bool, Self::Error> {
        (**self).mark_deleted(id)
    }
}
