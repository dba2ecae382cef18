//! HTTP surface for taskboard.
//!
//! The binary wires [`http::build_router`] to a SQLite-backed service; tests
//! drive the same router in process.

pub mod http;

pub use http::{build_router, serve};
