use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::status::{Priority, TaskStatus};

/// A stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier assigned by the store on creation.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    /// Free-form details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grouping label such as `work` or `shopping`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Progress.
    #[serde(default)]
    pub status: TaskStatus,
    /// Soft-delete marker. Only the delete operation sets it.
    #[serde(default)]
    pub is_deleted: bool,
}

impl Task {
    /// Materialize a freshly validated task under the given id.
    #[must_use]
    pub fn from_new(id: TaskId, new: NewTask) -> Self {
        let NewTask {
            title,
            description,
            category,
            priority,
            status,
        } = new;
        Self {
            id,
            title,
            description,
            category,
            priority,
            status,
            is_deleted: false,
        }
    }
}

/// Validated payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Non-blank title.
    pub title: String,
    /// Optional details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Initial status.
    #[serde(default)]
    pub status: TaskStatus,
}

#[allow(clippy::missing_const_for_fn)]
impl NewTask {
    /// Start a pending task with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            priority: None,
            status: TaskStatus::Pending,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Override the initial status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Field-level partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Returns true when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Keep only the fields whose value differs from `task`.
    #[must_use]
    pub fn changes_against(&self, task: &Task) -> Self {
        Self {
            title: self.title.clone().filter(|title| *title != task.title),
            description: self
                .description
                .clone()
                .filter(|description| task.description.as_ref() != Some(description)),
            category: self
                .category
                .clone()
                .filter(|category| task.category.as_ref() != Some(category)),
            priority: self.priority.filter(|priority| task.priority != Some(*priority)),
            status: self.status.filter(|status| task.status != *status),
        }
    }

    /// Write the supplied fields into `task`, returning whether anything changed.
    pub fn apply_to(&self, task: &mut Task) -> bool {
        let changes = self.changes_against(task);
        if changes.is_empty() {
            return false;
        }
        let Self {
            title,
            description,
            category,
            priority,
            status,
        } = changes;
        if let Some(title) = title {
            task.title = title;
        }
        if description.is_some() {
            task.description = description;
        }
        if category.is_some() {
            task.category = category;
        }
        if priority.is_some() {
            task.priority = priority;
        }
        if let Some(status) = status {
            task.status = status;
        }
        true
    }
}

/// Trim-aware emptiness check shared by payload normalizers.
///
/// Blank strings count as absent, matching how the web form submits untouched
/// inputs.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
