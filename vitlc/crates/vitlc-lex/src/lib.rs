//! vitlc-lex - Lexical analysis for the Vitl language.
//!
//! The lexer is a pure function over a [`vitlc_util::SourceBuffer`]: it
//! produces a lazy stream of [`Token`]s carrying positions, borrowed raw
//! slices, and decoded numeric/boolean/char payloads, with one token of
//! lookahead. Lexical faults become [`TokenKind::Error`] tokens rather than
//! panics or early returns, so a whole file can be scanned in one pass; the
//! driver decides that any such token is fatal.
//!
//! String contents are decoded lazily: see [`decode_string`] and
//! [`decode_char`].

pub mod cursor;
pub mod decode;
pub mod error;
mod lexer;
pub mod token;

pub use decode::{decode_char, decode_string};
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenKind};

mod edge_cases;
