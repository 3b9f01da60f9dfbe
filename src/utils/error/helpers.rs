//! Helper functions for creating specific error types

use super::types::BulkError;

impl BulkError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn date<S: Into<String>>(message: S) -> Self {
        Self::Date(message.into())
    }

    pub fn cancelled<S: Into<String>>(message: S) -> Self {
        Self::Cancelled(message.into())
    }

    pub fn write<A, U, R>(action: A, url: U, status: u16, reason: R) -> Self
    where
        A: Into<String>,
        U: Into<String>,
        R: Into<String>,
    {
        Self::Write {
            action: action.into(),
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    /// True when the error was raised before any request left the process
    pub fn is_pre_dispatch(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Validation(_)
                | Self::InvalidInput(_)
                | Self::Csv(_)
                | Self::Cancelled(_)
        )
    }
}
