//! Client state layer for taskboard.
//!
//! Front ends talk to the task service through [`TaskClient`], which keeps
//! the last fetched list and drops it after mutations. [`UiState`] carries
//! dialog visibility and the filter selection.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod list_cache;
pub mod ui_state;

pub use api::TaskApi;
pub use client::{InvalidationPolicy, TaskClient};
pub use error::ClientError;
pub use http::HttpTaskApi;
pub use list_cache::{CachedList, ListCache};
pub use ui_state::{FilterSelection, TargetedDialog, UiState};
