//! Domain types for taskboard: task records, identifiers, filters and patches.

/// Payload validation errors.
pub mod error;
/// List filters.
pub mod filter;
/// Identifier types.
pub mod id;
/// Raw request payloads.
pub mod payload;
/// Status and priority enumerations.
pub mod status;
/// Task records, creation payloads and partial updates.
pub mod task;

pub use error::ValidationError;
pub use filter::TaskFilter;
pub use id::TaskId;
pub use payload::{CreateTaskRequest, UpdateTaskRequest};
pub use status::{Priority, TaskStatus};
pub use task::{NewTask, Task, TaskPatch, non_blank};
