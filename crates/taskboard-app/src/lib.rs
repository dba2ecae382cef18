//! Application layer logic for taskboard.
//!
//! This crate provides the task service, its storage seam, configuration, and
//! utilities shared by the HTTP server, the CLI and the client state layer.

pub mod async_service;
pub mod config;
pub mod filter_util;
pub mod service;
pub mod task_store;

// Re-exports for convenience
pub use async_service::AsyncTaskService;
pub use config::{CONFIG_FILE, CategoryConfig, ProjectConfig, ServerConfig, StorageConfig};
pub use filter_util::{TaskFilterBuilder, normalize_filter};
pub use service::{DeleteOutcome, InsertOutcome, TaskService, TaskServiceError};
pub use task_store::TaskStore;
