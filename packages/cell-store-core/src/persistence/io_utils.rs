//! I/O utilities for marker operations.

use std::io::ErrorKind;

use crate::error::DbError;

/// Classifies I/O errors into specific DbError variants.
pub fn classify_io_error(error: std::io::Error, context: &str) -> DbError {
    match error.kind() {
        ErrorKind::StorageFull | ErrorKind::OutOfMemory => {
            DbError::DiskFull(format!("{}: {}", context, error))
        }
        _ => DbError::IoError(format!("{}: {}", context, error)),
    }
}
