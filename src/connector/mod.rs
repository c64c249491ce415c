//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Storage (DuckDB file or in-memory database, plain in-process maps)
//! - CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
