//! Error types for canvas-bulk

use crate::core::pagination::ReadError;
use crate::core::transport::TransportError;
use crate::core::validation::ValidationError;
use thiserror::Error;

/// Result type alias for canvas-bulk
pub type Result<T> = std::result::Result<T, BulkError>;

/// Main error type for canvas-bulk
#[derive(Error, Debug)]
pub enum BulkError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structural problems with the input file, raised before any network call
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A prerequisite read failed; nothing was written
    #[error("{0}")]
    Read(#[from] ReadError),

    /// A single transport failure outside of a dispatched batch
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A single, non-batched write was rejected by Canvas
    #[error("ERROR {status} while {action} ({url}): {reason}")]
    Write {
        action: String,
        url: String,
        status: u16,
        reason: String,
    },

    /// Spreadsheet read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Command arguments that cannot be acted on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Date parsing or arithmetic errors
    #[error("Date error: {0}")]
    Date(String),

    /// The user declined a confirmation prompt
    #[error("Cancelled: {0}")]
    Cancelled(String),
}
