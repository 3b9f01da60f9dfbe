//! Error handling for canvas-bulk
//!
//! This module defines the crate-wide error type. Layer-specific errors
//! (validation, paginated reads, transport) live next to the code that
//! raises them and fold into [`BulkError`] through `From` conversions.

mod helpers;
mod types;

pub use types::{BulkError, Result};
