//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

impl Validate for BulkConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating configuration");

        self.canvas.validate()?;
        self.dispatch.validate()?;
        self.report.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

impl Validate for CanvasConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err(
                "Canvas base URL is required (set canvas.base_url or CANVAS_BASE_URL)".to_string(),
            );
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Canvas base URL is not a valid URL: {}", e))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "Canvas base URL must use http:// or https://, got: {}",
                    scheme
                ));
            }
        }
        if url.host_str().is_none() {
            return Err("Canvas base URL must have a host".to_string());
        }

        if let Some(token) = &self.access_token {
            if token.trim().is_empty() {
                return Err("Canvas access token cannot be blank".to_string());
            }
        }

        if self.timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.timeout_secs > 3600 {
            return Err("Request timeout should not exceed 1 hour".to_string());
        }

        Ok(())
    }
}

impl Validate for DispatchSettings {
    fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("Chunk size must be greater than 0".to_string());
        }
        if self.chunk_size > 100 {
            return Err("Chunk size should not exceed 100 concurrent requests".to_string());
        }
        if self.chunk_delay_ms > 60_000 {
            return Err("Chunk delay should not exceed 60 seconds".to_string());
        }
        if self.server_error_retries > 5 {
            return Err("Server error retries should not exceed 5".to_string());
        }
        if self.max_requests == 0 {
            return Err("Maximum requests per import must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<(), String> {
        let name = self.error_file.trim();
        if name.is_empty() {
            return Err("Error file name cannot be empty".to_string());
        }
        if name.contains('/') || name.contains('\\') {
            return Err(format!(
                "Error file name must not contain a path separator: {}",
                name
            ));
        }
        Ok(())
    }
}
