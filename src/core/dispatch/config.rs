//! Dispatcher configuration

use crate::config::DispatchSettings;
use std::time::Duration;

/// Configuration for chunked dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Requests started together (default: 10)
    pub chunk_size: usize,
    /// Delay between chunk starts (default: 1s)
    pub chunk_delay: Duration,
    /// Immediate retries after a 5xx response (default: 1)
    pub server_error_retries: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            chunk_delay: Duration::from_secs(1),
            server_error_retries: 1,
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set chunk size; zero is raised to one
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_chunk_delay(mut self, chunk_delay: Duration) -> Self {
        self.chunk_delay = chunk_delay;
        self
    }

    pub fn with_server_error_retries(mut self, retries: u32) -> Self {
        self.server_error_retries = retries;
        self
    }

    /// Number of chunks needed for `total` requests
    pub fn chunk_count(&self, total: usize) -> usize {
        total.div_ceil(self.chunk_size.max(1))
    }
}

impl From<&DispatchSettings> for DispatchConfig {
    fn from(settings: &DispatchSettings) -> Self {
        Self::new()
            .with_chunk_size(settings.chunk_size)
            .with_chunk_delay(Duration::from_millis(settings.chunk_delay_ms))
            .with_server_error_retries(settings.server_error_retries)
    }
}
