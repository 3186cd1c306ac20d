//! Error types for field dictionaries.

use thiserror::Error;

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors raised when looking up statements or fields by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Statement name not recognised
    #[error("Unknown statement kind: {0}")]
    UnknownStatement(String),

    /// Field name not present in the statement's dictionary
    #[error("Unknown field '{field}' for {statement}")]
    UnknownField {
        /// Statement name
        statement: String,
        /// Field name
        field: String,
    },
}
