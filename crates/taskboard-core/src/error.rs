//! Validation errors for task payloads.

use thiserror::Error;

/// Reasons a task payload is rejected before it reaches storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is absent or blank.
    #[error("title is required")]
    MissingTitle,

    /// Status is not one of the known values.
    #[error("invalid status '{0}' (expected pending, in-progress or completed)")]
    InvalidStatus(String),

    /// Priority is not one of the known values.
    #[error("invalid priority '{0}' (expected low, medium or high)")]
    InvalidPriority(String),

    /// Category is outside the configured set.
    #[error("category '{category}' is not allowed. Allowed values: {allowed}")]
    UnknownCategory {
        /// Rejected category.
        category: String,
        /// Comma separated list of allowed categories.
        allowed: String,
    },

    /// Caller tried to create a task that is already deleted.
    #[error("isDeleted cannot be set when creating a task")]
    DeletedOnCreate,
}
