//! Utility modules for canvas-bulk
//!
//! - **error**: crate-wide error type and `Result` alias
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{BulkError, Result};
