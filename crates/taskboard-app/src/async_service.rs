//! Async facade over [`TaskService`] for tokio-based surfaces.

use anyhow::anyhow;
use std::sync::Arc;
use taskboard_core::{
    CreateTaskRequest, NewTask, Task, TaskFilter, TaskId, TaskPatch, UpdateTaskRequest,
};

use crate::config::CategoryConfig;
use crate::service::{DeleteOutcome, InsertOutcome, TaskService, TaskServiceError};
use crate::task_store::TaskStore;

/// Cloneable handle that runs blocking store calls on tokio's blocking pool.
pub struct AsyncTaskService<S> {
    inner: Arc<TaskService<S>>,
}

impl<S> Clone for AsyncTaskService<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> AsyncTaskService<S>
where
    S: TaskStore + Send + Sync + 'static,
{
    /// Wrap a synchronous service.
    pub fn new(service: TaskService<S>) -> Self {
        Self {
            inner: Arc::new(service),
        }
    }

    /// Borrow the category configuration.
    pub fn categories(&self) -> &CategoryConfig {
        self.inner.categories()
    }

    async fn run<F, R>(&self, action: F) -> Result<R, TaskServiceError>
    where
        F: FnOnce(&TaskService<S>) -> Result<R, TaskServiceError> + Send + 'static,
        R: Send + 'static,
    {
        let service = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || action(&service))
            .await
            .map_err(|e| TaskServiceError::Store(anyhow!("Task join error: {e}")))?
    }

    /// See [`TaskService::list`].
    ///
    /// # Errors
    /// Propagates [`TaskServiceError`] from the service.
    pub async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskServiceError> {
        self.run(move |service| service.list(&filter)).await
    }

    /// See [`TaskService::create`].
    ///
    /// # Errors
    /// Propagates [`TaskServiceError`] from the service.
    pub async fn create(&self, new: NewTask) -> Result<InsertOutcome, TaskServiceError> {
        self.run(move |service| service.create(new)).await
    }

    /// See [`TaskService::create_from_request`].
    ///
    /// # Errors
    /// Propagates [`TaskServiceError`] from the service.
    pub async fn create_from_request(
        &self,
        request: CreateTaskRequest,
    ) -> Result<InsertOutcome, TaskServiceError> {
        self.run(move |service| service.create_from_request(request))
            .await
    }

    /// See [`TaskService::update`].
    ///
    /// # Errors
    /// Propagates [`TaskServiceError`] from the service.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskServiceError> {
        self.run(move |service| service.update(id, patch)).await
    }

    /// See [`TaskService::update_from_request`].
    ///
    /// # Errors
    /// Propagates [`TaskServiceError`] from the service.
    pub async fn update_from_request(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> Result<Task, TaskServiceError> {
        self.run(move |service| service.update_from_request(id, request))
            .await
    }

    /// See [`TaskService::delete`].
    ///
    /// # Errors
    /// Propagates [`TaskServiceError`] from the service.
    pub async fn delete(&self, id: TaskId) -> Result<DeleteOutcome, TaskServiceError> {
        self.run(move |service| service.delete(id)).await
    }
}
