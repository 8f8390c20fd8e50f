//! Configuration error type.

use std::io;

use thiserror::Error;

/// Errors from loading or querying configuration.
///
/// File-shaped failures carry `path:line` so a single diagnostic line can
/// point at the offending entry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A line did not parse.
    #[error("{path}:{line}: {message}")]
    Parse {
        path: String,
        line: u32,
        message: String,
    },

    /// `@include` chains nested deeper than the limit.
    #[error("{path}:{line}: include depth limit exceeded")]
    IncludeDepth { path: String, line: u32 },

    /// A typed accessor was asked for a key that is not present.
    #[error("missing required key '{key}'")]
    MissingKey { key: String },

    /// A value did not coerce to the requested type.
    #[error("invalid value '{value}' for key '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}
