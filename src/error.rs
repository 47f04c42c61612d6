//! Error types for the fts-forecast library.

use thiserror::Error;

/// Result type alias for indexing, training and forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while indexing seasons, training or forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Missing or non-finite values detected when not allowed.
    #[error("missing values detected in data")]
    MissingValues,

    /// An indexer variant does not implement the requested capability.
    #[error("operation `{operation}` is not available on {indexer}")]
    UnsupportedOperation {
        indexer: &'static str,
        operation: &'static str,
    },

    /// The LHS key of a forecast query has no matching group.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// A fuzzy label could not be resolved in the fuzzy-set table.
    #[error("unknown fuzzy label: {0}")]
    UnknownLabel(String),

    /// Forecast attempted before training completed.
    #[error("model must be trained before forecasting")]
    ModelNotTrained,

    /// Invalid configuration (season lengths, date field, order, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Named column does not exist in the data frame.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Column exists but holds a different kind of values.
    #[error("column `{column}` is not of type {expected}, found {found}")]
    ColumnType {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Model (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Serialization(err.to_string())
    }
}
