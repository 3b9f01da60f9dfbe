//! Configuration management for canvas-bulk
//!
//! Configuration is layered: a YAML file, then `CANVAS_*` environment
//! variables, then command-line flags. The result is validated before any
//! request is built.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{BulkError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable overriding `canvas.base_url`
pub const ENV_BASE_URL: &str = "CANVAS_BASE_URL";
/// Environment variable overriding `canvas.access_token`
pub const ENV_ACCESS_TOKEN: &str = "CANVAS_ACCESS_TOKEN";
/// Environment variable overriding `dispatch.chunk_size`
pub const ENV_CHUNK_SIZE: &str = "CANVAS_CHUNK_SIZE";
/// Environment variable overriding `dispatch.chunk_delay_ms`
pub const ENV_CHUNK_DELAY_MS: &str = "CANVAS_CHUNK_DELAY_MS";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub bulk: BulkConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BulkError::Config(format!("Failed to read config file: {}", e)))?;

        let bulk: BulkConfig = serde_yaml::from_str(&content)
            .map_err(|e| BulkError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed");
        Ok(Self { bulk })
    }

    /// Overlay `CANVAS_*` variables from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay `CANVAS_*` variables using an arbitrary lookup
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            debug!("Overriding base URL from {}", ENV_BASE_URL);
            self.bulk.canvas.base_url = url;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.bulk.canvas.access_token = Some(token);
        }
        if let Some(size) = lookup(ENV_CHUNK_SIZE) {
            self.bulk.dispatch.chunk_size = size.trim().parse().map_err(|e| {
                BulkError::Config(format!("Invalid {} '{}': {}", ENV_CHUNK_SIZE, size, e))
            })?;
        }
        if let Some(delay) = lookup(ENV_CHUNK_DELAY_MS) {
            self.bulk.dispatch.chunk_delay_ms = delay.trim().parse().map_err(|e| {
                BulkError::Config(format!(
                    "Invalid {} '{}': {}",
                    ENV_CHUNK_DELAY_MS, delay, e
                ))
            })?;
        }
        Ok(self)
    }

    /// Get Canvas connection settings
    pub fn canvas(&self) -> &CanvasConfig {
        &self.bulk.canvas
    }

    /// Get dispatch settings
    pub fn dispatch(&self) -> &DispatchSettings {
        &self.bulk.dispatch
    }

    /// Get report settings
    pub fn report(&self) -> &ReportConfig {
        &self.bulk.report
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.bulk.validate().map_err(BulkError::Config)?;
        if self.bulk.canvas.access_token.is_none() {
            return Err(BulkError::Config(format!(
                "Canvas access token is required (set canvas.access_token or {})",
                ENV_ACCESS_TOKEN
            )));
        }
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.bulk)
            .map_err(|e| BulkError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
