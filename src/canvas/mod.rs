//! Canvas REST API access
//!
//! Resource models, URL construction, and the [`CanvasApi`] facade used by
//! workflows for prerequisite reads and single writes.

mod api;
pub mod models;
pub mod paths;

pub use api::{CanvasApi, format_number};
pub use models::*;
