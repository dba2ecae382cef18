use taskboard_app::{DeleteOutcome, InsertOutcome, normalize_filter};
use taskboard_core::{NewTask, Task, TaskFilter, TaskId, TaskPatch};
use tracing::debug;

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::list_cache::{CachedList, ListCache};

/// Which successful mutations drop the cached list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidationPolicy {
    /// Create, update and delete all invalidate.
    #[default]
    AllMutations,
    /// Only create invalidates; updates and deletes leave the list stale.
    CreateOnly,
}

/// Issues requests through a [`TaskApi`] and caches the last fetched list.
pub struct TaskClient<A> {
    api: A,
    cache: ListCache,
    policy: InvalidationPolicy,
}

impl<A> TaskClient<A> {
    /// Client with the default policy.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: ListCache::default(),
            policy: InvalidationPolicy::default(),
        }
    }

    /// Override the invalidation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: InvalidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active invalidation policy.
    #[must_use]
    pub const fn policy(&self) -> InvalidationPolicy {
        self.policy
    }

    /// Cached list, if any.
    #[must_use]
    pub const fn cached(&self) -> Option<&CachedList> {
        self.cache.entry()
    }

    /// Drop the cached list.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Borrow the backend.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }
}

impl<A> TaskClient<A>
where
    A: TaskApi,
{
    /// Tasks for `filter`, served from cache when it was fetched with the same filter.
    ///
    /// # Errors
    /// Returns [`ClientError`] when a fetch is needed and fails.
    pub async fn tasks(&mut self, filter: &TaskFilter) -> Result<&[Task], ClientError> {
        let filter = normalize_filter(filter);
        if self.cache.get(&filter).is_some() {
            debug!("task list served from cache");
        } else {
            self.fetch(filter.clone()).await?;
        }
        Ok(self.cache.get(&filter).unwrap_or_default())
    }

    /// Re-fetch `filter` regardless of the cache.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the fetch fails.
    pub async fn refresh(&mut self, filter: &TaskFilter) -> Result<&[Task], ClientError> {
        let filter = normalize_filter(filter);
        self.fetch(filter.clone()).await?;
        Ok(self.cache.get(&filter).unwrap_or_default())
    }

    async fn fetch(&mut self, filter: TaskFilter) -> Result<(), ClientError> {
        let tasks = self.api.list(&filter).await?;
        debug!(count = tasks.len(), "fetched task list");
        self.cache.store(filter, tasks);
        Ok(())
    }

    /// Create a task and invalidate the list.
    ///
    /// # Errors
    /// Returns [`ClientError`] from the backend; the cache is kept on failure.
    pub async fn create(&mut self, new: &NewTask) -> Result<InsertOutcome, ClientError> {
        let outcome = self.api.create(new).await?;
        self.cache.invalidate();
        Ok(outcome)
    }

    /// Update a task; invalidates the list under [`InvalidationPolicy::AllMutations`].
    ///
    /// # Errors
    /// Returns [`ClientError`] from the backend; the cache is kept on failure.
    pub async fn update(&mut self, id: TaskId, patch: &TaskPatch) -> Result<Task, ClientError> {
        let task = self.api.update(id, patch).await?;
        self.after_mutation();
        Ok(task)
    }

    /// Delete a task; invalidates the list under [`InvalidationPolicy::AllMutations`].
    ///
    /// # Errors
    /// Returns [`ClientError`] from the backend; the cache is kept on failure.
    pub async fn delete(&mut self, id: TaskId) -> Result<DeleteOutcome, ClientError> {
        let outcome = self.api.delete(id).await?;
        self.after_mutation();
        Ok(outcome)
    }

    /// Flip `task` between completed and pending.
    ///
    /// # Errors
    /// Returns [`ClientError`] from the update.
    pub async fn toggle_completed(&mut self, task: &Task) -> Result<Task, ClientError> {
        let patch = TaskPatch {
            status: Some(task.status.toggled()),
            ..TaskPatch::default()
        };
        self.update(task.id, &patch).await
    }

    fn after_mutation(&mut self) {
        if self.policy == InvalidationPolicy::AllMutations {
            self.cache.invalidate();
        }
    }
}
