//! Error types for `.smo` file I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for `.smo` file operations.
pub type SmoResult<T> = Result<T, SmoError>;

/// Errors that can occur while loading or saving `.smo` files.
///
/// Parsing itself never fails: unrecognized lines are ignored and
/// malformed records skipped, so only filesystem problems surface here.
#[derive(Debug, Error)]
pub enum SmoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
