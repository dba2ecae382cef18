//! Raw request payloads and their normalization into typed values.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::status::{Priority, TaskStatus};
use crate::task::{NewTask, TaskPatch, non_blank};

/// Body accepted when creating a task.
///
/// Every field is optional at the wire level so a missing title surfaces as a
/// [`ValidationError`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTaskRequest {
    /// Title text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Priority in wire form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Status in wire form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Accepted only so that `true` can be rejected explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

impl CreateTaskRequest {
    /// Validate the payload.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when the title is blank, an enum value is
    /// unknown, or the payload asks for a deleted record.
    pub fn into_new_task(self) -> Result<NewTask, ValidationError> {
        if self.is_deleted == Some(true) {
            return Err(ValidationError::DeletedOnCreate);
        }
        let title = non_blank(self.title).ok_or(ValidationError::MissingTitle)?;
        let status = non_blank(self.status)
            .map(|value| value.parse::<TaskStatus>())
            .transpose()?
            .unwrap_or_default();
        let priority = non_blank(self.priority)
            .map(|value| value.parse::<Priority>())
            .transpose()?;
        Ok(NewTask {
            title,
            description: non_blank(self.description),
            category: non_blank(self.category),
            priority,
            status,
        })
    }
}

impl From<NewTask> for CreateTaskRequest {
    fn from(new: NewTask) -> Self {
        Self {
            title: Some(new.title),
            description: new.description,
            category: new.category,
            priority: new.priority.map(|priority| priority.as_str().to_owned()),
            status: Some(new.status.as_str().to_owned()),
            is_deleted: None,
        }
    }
}

/// Body accepted when updating a task. Unknown fields, `isDeleted` included,
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New priority in wire form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// New status in wire form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    /// Drop blank fields and parse enum values.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when a supplied status or priority is unknown.
    pub fn into_patch(self) -> Result<TaskPatch, ValidationError> {
        Ok(TaskPatch {
            title: non_blank(self.title),
            description: non_blank(self.description),
            category: non_blank(self.category),
            priority: non_blank(self.priority)
                .map(|value| value.parse::<Priority>())
                .transpose()?,
            status: non_blank(self.status)
                .map(|value| value.parse::<TaskStatus>())
                .transpose()?,
        })
    }
}

impl From<TaskPatch> for UpdateTaskRequest {
    fn from(patch: TaskPatch) -> Self {
        Self {
            title: patch.title,
            description: patch.description,
            category: patch.category,
            priority: patch.priority.map(|priority| priority.as_str().to_owned()),
            status: patch.status.map(|status| status.as_str().to_owned()),
        }
    }
}
