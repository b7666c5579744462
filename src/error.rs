//! Error types for isisdat library

use std::io;
use thiserror::Error;

/// Main error type for isisdat operations
#[derive(Debug, Error)]
pub enum DatError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing the fixed-column text of a unit
    #[error("Parse error: {0}")]
    Parse(String),

    /// Row index outside the bounds of a row collection
    #[error("Row index {index} is outside bounds of row data (rows: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Column or header field key that the unit does not declare
    #[error("Key {0} does not exist in collection")]
    UnknownField(String),

    /// Row collection key that the unit does not hold
    #[error("Row collection {0} does not exist in unit")]
    UnknownCollection(String),

    /// Ordering value that does not lie strictly between its neighbours
    #[error("Ordering value {value} must lie strictly between neighbors (previous: {previous:?}, next: {next:?})")]
    OrderingViolation {
        value: f64,
        previous: Option<f64>,
        next: Option<f64>,
    },

    /// Row operation requested on a unit that carries no row data
    #[error("Row data operations are not applicable to {unit_type} units")]
    NotApplicable { unit_type: String },

    /// Value that does not fit a field's type or allowed choices
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for isisdat operations
pub type Result<T> = std::result::Result<T, DatError>;

impl From<String> for DatError {
    fn from(s: String) -> Self {
        DatError::Custom(s)
    }
}

impl From<&str> for DatError {
    fn from(s: &str) -> Self {
        DatError::Custom(s.to_string())
    }
}
