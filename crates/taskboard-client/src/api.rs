//! Backend seam for the client state layer.

use taskboard_app::{AsyncTaskService, DeleteOutcome, InsertOutcome, TaskStore};
use taskboard_core::{NewTask, Task, TaskFilter, TaskId, TaskPatch};

use crate::error::ClientError;

/// The four task operations as seen from a front end.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    /// Fetch active tasks matching `filter`.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the backend fails.
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError>;

    /// Create a task.
    ///
    /// # Errors
    /// Returns [`ClientError::Validation`] for rejected payloads.
    async fn create(&self, new: &NewTask) -> Result<InsertOutcome, ClientError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] when nothing was modified.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ClientError>;

    /// Soft-delete a task.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] when the task is missing or already deleted.
    async fn delete(&self, id: TaskId) -> Result<DeleteOutcome, ClientError>;
}

/// In-process backend calling the service directly.
impl<S> TaskApi for AsyncTaskService<S>
where
    S: TaskStore + Send + Sync + 'static,
{
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError> {
        Ok(Self::list(self, filter.clone()).await?)
    }

    async fn create(&self, new: &NewTask) -> Result<InsertOutcome, ClientError> {
        Ok(Self::create(self, new.clone()).await?)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ClientError> {
        Ok(Self::update(self, id, patch.clone()).await?)
    }

    async fn delete(&self, id: TaskId) -> Result<DeleteOutcome, ClientError> {
        Ok(Self::delete(self, id).await?)
    }
}

impl<A> TaskApi for &A
where
    A: TaskApi + ?Sized,
{
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError> {
        (*self).list(filter).await
    }

    async fn create(&self, new: &NewTask) -> Result<InsertOutcome, ClientError> {
        (*self).create(new).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ClientError> {
        (*self).update(id, patch).await
    }

    async fn delete(&self, id: TaskId) -> Result<DeleteOutcome, ClientError> {
        (*self).delete(id).await
    }
}
