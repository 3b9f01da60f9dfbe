//! Canvas connection configuration

use serde::{Deserialize, Serialize};

/// Canvas instance and credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasConfig {
    /// Instance root, e.g. `https://canvas.example.edu`
    #[serde(default)]
    pub base_url: String,
    /// Personal access token sent as a bearer header
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("canvas-bulk/{}", env!("CARGO_PKG_VERSION"))
}
