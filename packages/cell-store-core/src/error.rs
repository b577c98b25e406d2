//! Database error types.

use thiserror::Error;

/// Database operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// Table not found
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Table already exists
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Disk full error while touching a table marker
    #[error("Disk full: {0}")]
    DiskFull(String),

    /// I/O error while touching a table marker
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DbError {
    /// Returns true for failures of the durable marker storage.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, DbError::IoError(_) | DbError::DiskFull(_))
    }
}
