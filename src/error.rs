//! Error types for the marque-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building series or fitting models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before forecasting")]
    FitRequired,

    /// Computation error (e.g., numerical issues during fitting).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// No candidate in the search grid could be fitted for a cohort.
    #[error("no viable model for cohort {state}/{brand}")]
    NoViableModel { state: String, brand: String },

    /// A tabular file could not be read, parsed, or written.
    #[error("table I/O error: {0}")]
    Io(String),
}
