//! Chunked dispatch configuration

use serde::{Deserialize, Serialize};

/// Chunked dispatch tuning, as read from the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchSettings {
    /// Requests started together in one chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Spacing between chunk starts, in milliseconds
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
    /// Immediate retries for a request answered with a 5xx status
    #[serde(default = "default_server_error_retries")]
    pub server_error_retries: u32,
    /// Largest batch a single import may send
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_delay_ms: default_chunk_delay_ms(),
            server_error_retries: default_server_error_retries(),
            max_requests: default_max_requests(),
        }
    }
}

fn default_chunk_size() -> usize {
    10
}

fn default_chunk_delay_ms() -> u64 {
    1000
}

fn default_server_error_retries() -> u32 {
    1
}

fn default_max_requests() -> usize {
    10_000
}
