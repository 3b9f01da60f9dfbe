//! Outcome report configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where error logs and exports are written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Directory receiving error logs and exports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File name of the per-failure error log
    #[serde(default = "default_error_file")]
    pub error_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            error_file: default_error_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_error_file() -> String {
    "errors.txt".to_string()
}
