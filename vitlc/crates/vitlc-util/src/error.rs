//! Shared error types.
//!
//! I/O failures everywhere in vitlc carry the path they happened on, so a
//! single diagnostic line can name both the file and the OS error.

use std::io;

use thiserror::Error;

/// An I/O failure tagged with the path it occurred on.
#[derive(Debug, Error)]
#[error("{path}: {source}")]
pub struct IoError {
    /// Path (or `-` for a standard stream) the operation touched.
    pub path: String,
    /// Underlying OS error.
    #[source]
    pub source: io::Error,
}

impl IoError {
    /// Wraps an OS error with the path it occurred on.
    pub fn new(path: impl Into<String>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
