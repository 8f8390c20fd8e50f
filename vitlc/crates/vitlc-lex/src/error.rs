//! Lexer error type.

use thiserror::Error;
use vitlc_util::Pos;

/// Errors surfaced through the lexer's `Result` APIs.
///
/// Faults found while scanning are *not* reported this way; those become
/// [`crate::TokenKind::Error`] tokens so the stream stays total. `LexError`
/// covers `expect` mismatches and literal decoding.
#[derive(Debug, Error, PartialEq)]
pub enum LexError {
    /// `expect` saw a different token than asked for.
    #[error("{pos}: expected {expected}, found {found}")]
    UnexpectedToken {
        pos: Pos,
        expected: String,
        found: String,
    },

    /// A literal's raw slice could not be decoded.
    #[error("{pos}: {message}")]
    Decode { pos: Pos, message: String },
}
