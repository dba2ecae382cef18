use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Exact-match list filter. Deleted tasks never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Required status (wire form, e.g. `in-progress`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Required priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Required category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TaskFilter {
    /// Returns true when no criteria are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.category.is_none()
    }

    /// Evaluate the filter against a task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if task.is_deleted {
            return false;
        }
        if let Some(status) = &self.status
            && task.status.as_str() != status
        {
            return false;
        }
        if let Some(priority) = &self.priority
            && task.priority.map(|p| p.as_str()) != Some(priority.as_str())
        {
            return false;
        }
        if let Some(category) = &self.category
            && task.category.as_deref() != Some(category.as_str())
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::status::{Priority, TaskStatus};
    use crate::task::NewTask;

    fn task(status: TaskStatus, priority: Option<Priority>, category: Option<&str>) -> Task {
        let mut new = NewTask::new("t").with_status(status);
        new.priority = priority;
        new.category = category.map(str::to_owned);
        Task::from_new(TaskId::new(), new)
    }

    #[test]
    fn empty_filter_matches_active_tasks_only() {
        let filter = TaskFilter::default();
        let active = task(TaskStatus::Pending, None, None);
        let mut deleted = active.clone();
        deleted.is_deleted = true;

        assert!(filter.is_empty());
        assert!(filter.matches(&active));
        assert!(!filter.matches(&deleted));
    }

    #[test]
    fn criteria_are_exact_and_combined() {
        let filter = TaskFilter {
            status: Some("completed".into()),
            priority: Some("high".into()),
            category: Some("work".into()),
        };
        assert!(filter.matches(&task(TaskStatus::Completed, Some(Priority::High), Some("work"))));
        assert!(!filter.matches(&task(TaskStatus::Pending, Some(Priority::High), Some("work"))));
        assert!(!filter.matches(&task(TaskStatus::Completed, None, Some("work"))));
        assert!(!filter.matches(&task(TaskStatus::Completed, Some(Priority::High), Some("Work"))));
    }

    #[test]
    fn unknown_status_matches_nothing() {
        let filter = TaskFilter {
            status: Some("done".into()),
            ..TaskFilter::default()
        };
        assert!(!filter.matches(&task(TaskStatus::Completed, None, None)));
    }
}
