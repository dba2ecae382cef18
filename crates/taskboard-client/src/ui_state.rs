//! Ephemeral UI state. Never persisted.

use taskboard_app::TaskFilterBuilder;
use taskboard_core::{TaskFilter, TaskId};

/// A dialog bound to a specific task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetedDialog {
    open: bool,
    target: Option<TaskId>,
}

impl TargetedDialog {
    /// Whether the dialog is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Task the dialog acts on.
    #[must_use]
    pub const fn target(&self) -> Option<TaskId> {
        self.target
    }

    const fn open(&mut self, task: TaskId) {
        self.open = true;
        self.target = Some(task);
    }

    const fn close(&mut self) {
        self.open = false;
        self.target = None;
    }
}

/// Current filter selection as chosen in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Selected category.
    pub category: Option<String>,
    /// Selected priority.
    pub priority: Option<String>,
    /// Selected status.
    pub status: Option<String>,
}

/// Dialog visibility and filter selection for a task list screen.
///
/// Each dialog has its own visibility flag, so opening one never shows or
/// hides another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    add_dialog_open: bool,
    delete_dialog: TargetedDialog,
    edit_dialog: TargetedDialog,
    selection: FilterSelection,
}

#[allow(clippy::missing_const_for_fn)]
impl UiState {
    /// Whether the add-task dialog is shown.
    #[must_use]
    pub const fn is_add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    /// Show the add-task dialog.
    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    /// Hide the add-task dialog.
    pub fn close_add_dialog(&mut self) {
        self.add_dialog_open = false;
    }

    /// Delete-confirmation dialog state.
    #[must_use]
    pub const fn delete_dialog(&self) -> TargetedDialog {
        self.delete_dialog
    }

    /// Ask for confirmation before deleting `task`.
    pub fn open_delete_dialog(&mut self, task: TaskId) {
        self.delete_dialog.open(task);
    }

    /// Dismiss the delete confirmation.
    pub fn close_delete_dialog(&mut self) {
        self.delete_dialog.close();
    }

    /// Edit dialog state.
    #[must_use]
    pub const fn edit_dialog(&self) -> TargetedDialog {
        self.edit_dialog
    }

    /// Start editing `task`.
    pub fn open_edit_dialog(&mut self, task: TaskId) {
        self.edit_dialog.open(task);
    }

    /// Stop editing.
    pub fn close_edit_dialog(&mut self) {
        self.edit_dialog.close();
    }

    /// Current filter selection.
    #[must_use]
    pub const fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Select a category; `None`, blank or `all` clears it.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.selection.category = TaskFilterBuilder::new().with_category(category).build().category;
    }

    /// Select a priority; `None`, blank or `all` clears it.
    pub fn set_priority(&mut self, priority: Option<&str>) {
        self.selection.priority = TaskFilterBuilder::new().with_priority(priority).build().priority;
    }

    /// Select a status; `None`, blank or `all` clears it.
    pub fn set_status(&mut self, status: Option<&str>) {
        self.selection.status = TaskFilterBuilder::new().with_status(status).build().status;
    }

    /// Filter to request the list with.
    #[must_use]
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.selection.status.clone(),
            priority: self.selection.priority.clone(),
            category: self.selection.category.clone(),
        }
    }
}
