//! Error types for the Oracle dialect.

use thiserror::Error;

/// The main error type for Oracle dialect operations.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The dialect has no implementation for this operation.
    #[error("Unsupported operation: {0} has not been implemented")]
    Unsupported(String),

    /// A logical column type with no native mapping.
    #[error("Column type {0} not yet implemented")]
    UnsupportedType(String),

    /// An insert row carries more values than declared columns.
    #[error("Insert row {row} has {values} values but only {columns} columns")]
    ShapeMismatch {
        row: usize,
        columns: usize,
        values: usize,
    },

    /// The query cannot be compiled in its current shape.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OracleError {
    /// Create an unsupported-operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    /// Create an invalid-query error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }
}

/// Result type alias for Oracle dialect operations.
pub type OracleResult<T> = Result<T, OracleError>;
