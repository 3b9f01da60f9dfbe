//! Configuration data models
//!
//! This module defines all configuration structures used by canvas-bulk.

pub mod canvas;
pub mod dispatch;
pub mod report;

pub use canvas::*;
pub use dispatch::*;
pub use report::*;

use serde::{Deserialize, Serialize};

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BulkConfig {
    /// Canvas instance and credentials
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Chunked dispatch tuning
    #[serde(default)]
    pub dispatch: DispatchSettings,
    /// Error artifact placement
    #[serde(default)]
    pub report: ReportConfig,
}
