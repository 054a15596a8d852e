//! Custom error types for the finance tracker
//!
//! This module defines the error hierarchy for the ledger library using
//! thiserror for ergonomic error definitions. None of these errors is fatal:
//! every one is reported upward for the front-end to display.

use thiserror::Error;

/// The main error type for finance tracker operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// The ledger file exists but could not be read or parsed
    #[error("Failed to load ledger: {0}")]
    Load(String),

    /// Bad date, amount, kind or category on add
    #[error("Validation error: {0}")]
    Validation(String),

    /// Import source is missing required columns
    #[error("Import file is missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FinanceError {
    /// Create a validation error from anything displayable
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a load error
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_yaml::Error> for FinanceError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for finance tracker operations
pub type FinanceResult<T> = Result<T, FinanceError>;
