use taskboard_core::{Task, TaskFilter};
use time::OffsetDateTime;

/// The single cached list result, keyed by the filter it was fetched with.
#[derive(Debug, Clone)]
pub struct CachedList {
    /// Filter the list was fetched with.
    pub filter: TaskFilter,
    /// Tasks as returned by the backend.
    pub tasks: Vec<Task>,
    /// When the list was fetched.
    pub fetched_at: OffsetDateTime,
}

/// One-entry cache. A read under a different filter replaces the entry.
#[derive(Debug, Clone, Default)]
pub struct ListCache {
    entry: Option<CachedList>,
}

impl ListCache {
    /// Tasks cached for exactly `filter`, if any.
    #[must_use]
    pub fn get(&self, filter: &TaskFilter) -> Option<&[Task]> {
        self.entry
            .as_ref()
            .filter(|entry| entry.filter == *filter)
            .map(|entry| entry.tasks.as_slice())
    }

    /// Replace the entry.
    pub fn store(&mut self, filter: TaskFilter, tasks: Vec<Task>) {
        self.entry = Some(CachedList {
            filter,
            tasks,
            fetched_at: OffsetDateTime::now_utc(),
        });
    }

    /// Drop the entry so the next read re-fetches.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Current entry regardless of filter.
    #[must_use]
    pub const fn entry(&self) -> Option<&CachedList> {
        self.entry.as_ref()
    }
}
