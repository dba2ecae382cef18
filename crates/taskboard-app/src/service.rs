//! Shared task operations used by the HTTP surface and the CLI.

use anyhow::Error;
use serde::{Deserialize, Serialize};
use taskboard_core::{
    CreateTaskRequest, NewTask, Task, TaskFilter, TaskId, TaskPatch, UpdateTaskRequest,
    ValidationError, non_blank,
};
use tracing::info;

use crate::config::CategoryConfig;
use crate::filter_util::normalize_filter;
use crate::task_store::TaskStore;

/// Message returned after a successful delete.
pub const DELETED_MESSAGE: &str = "Task deleted successfully";

/// Confirmation returned by [`TaskService::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Always `true` once the record is persisted.
    pub acknowledged: bool,
    /// Identifier assigned to the new record.
    pub inserted_id: TaskId,
}

/// Confirmation returned by [`TaskService::delete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Human-readable confirmation.
    pub message: String,
}

impl Default for DeleteOutcome {
    fn default() -> Self {
        Self {
            message: DELETED_MESSAGE.to_owned(),
        }
    }
}

/// Errors surfaced by [`TaskService`].
#[derive(thiserror::Error, Debug)]
pub enum TaskServiceError {
    /// Payload rejected before reaching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Update matched no active record or changed nothing.
    #[error("task {0} not found or no changes made")]
    NotFoundOrNoChange(TaskId),
    /// Delete matched no active record.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// Backing store returned an error.
    #[error("store error: {0}")]
    Store(#[from] Error),
}

/// The four task operations over a single collection.
pub struct TaskService<S> {
    store: S,
    categories: CategoryConfig,
}

impl<S> TaskService<S> {
    /// Construct a new service.
    pub const fn new(store: S, categories: CategoryConfig) -> Self {
        Self { store, categories }
    }

    /// Borrow the category configuration.
    pub const fn categories(&self) -> &CategoryConfig {
        &self.categories
    }

    /// Expose a reference to the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn store_error(err: S::Error) -> TaskServiceError
    where
        S: TaskStore,
    {
        TaskServiceError::Store(err.into())
    }
}

impl<S> TaskService<S>
where
    S: TaskStore,
{
    /// List active tasks matching `filter` in storage order.
    ///
    /// Blank criteria and the `all` sentinel are ignored.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Store`] when the query fails.
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskServiceError> {
        let filter = normalize_filter(filter);
        self.store.list(&filter).map_err(Self::store_error)
    }

    /// Validate a raw payload and insert it.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Validation`] for rejected payloads and
    /// [`TaskServiceError::Store`] when the insert fails.
    pub fn create_from_request(
        &self,
        request: CreateTaskRequest,
    ) -> Result<InsertOutcome, TaskServiceError> {
        self.create(request.into_new_task()?)
    }

    /// Insert a typed task under a freshly generated id.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::Validation`] for a blank title or a
    /// disallowed category and [`TaskServiceError::Store`] when the insert fails.
    pub fn create(&self, new: NewTask) -> Result<InsertOutcome, TaskServiceError> {
        let new = self.normalize_new(new)?;
        let task = Task::from_new(TaskId::new(), new);
        self.store.insert(&task).map_err(Self::store_error)?;
        info!(task = %task.id, title = %task.title, "created task");
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: task.id,
        })
    }

    /// Validate a raw patch and apply it.
    ///
    /// # Errors
    /// See [`TaskService::update`]; additionally returns
    /// [`TaskServiceError::Validation`] for unknown enum values.
    pub fn update_from_request(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> Result<Task, TaskServiceError> {
        self.update(id, request.into_patch()?)
    }

    /// Apply the supplied fields to an active task.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::NotFoundOrNoChange`] when the patch is
    /// empty, the task is missing or deleted, or no value differs;
    /// [`TaskServiceError::Validation`] for a disallowed category; and
    /// [`TaskServiceError::Store`] when the write fails.
    pub fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskServiceError> {
        let patch = TaskPatch {
            title: non_blank(patch.title),
            description: non_blank(patch.description),
            category: non_blank(patch.category),
            ..patch
        };
        if patch.is_empty() {
            return Err(TaskServiceError::NotFoundOrNoChange(id));
        }
        self.categories.validate_category(patch.category.as_deref())?;

        let updated = self
            .store
            .update_active(id, &patch)
            .map_err(Self::store_error)?
            .ok_or(TaskServiceError::NotFoundOrNoChange(id))?;
        info!(task = %id, "updated task");
        Ok(updated)
    }

    /// Soft-delete an active task.
    ///
    /// # Errors
    /// Returns [`TaskServiceError::NotFound`] when nothing was modified and
    /// [`TaskServiceError::Store`] when the write fails.
    pub fn delete(&self, id: TaskId) -> Result<DeleteOutcome, TaskServiceError> {
        if !self.store.mark_deleted(id).map_err(Self::store_error)? {
            return Err(TaskServiceError::NotFound(id));
        }
        info!(task = %id, "deleted task");
        Ok(DeleteOutcome::default())
    }

    fn normalize_new(&self, new: NewTask) -> Result<NewTask, ValidationError> {
        let title = non_blank(Some(new.title)).ok_or(ValidationError::MissingTitle)?;
        let category = non_blank(new.category);
        self.categories.validate_category(category.as_deref())?;
        Ok(NewTask {
            title,
            description: non_blank(new.description),
            category,
            ..new
        })
    }
}
