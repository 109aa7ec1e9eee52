//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Date text is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date format: '{0}' (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    /// Amount text is not a non-negative decimal number
    #[error("Invalid amount: '{0}' (expected a non-negative number)")]
    InvalidAmount(String),

    /// Month outside 1-12
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    /// The expenses document could not be read or parsed
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// The expenses document could not be written
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// A summary export could not be written
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl ExpenseError {
    /// Check if this error came from validating caller input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateFormat(_) | Self::InvalidAmount(_) | Self::InvalidMonth(_)
        )
    }

    /// Check if this error came from the storage layer
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageRead(_) | Self::StorageWrite(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
