//! vitlc-util - Foundation types for the Vitte/Vitl compiler.
//!
//! This crate holds the pieces every other vitlc crate leans on: the source
//! buffer and position model, validated UTF-8 helpers, caret diagnostics,
//! and the small set of filesystem helpers the driver needs (`mkdir -p`,
//! whole-file reads with a stdin sentinel, truncating writes).

pub mod diagnostic;
pub mod error;
pub mod fsx;
pub mod pos;
pub mod source;
pub mod utf8;

pub use diagnostic::{ColorChoice, Diagnostic};
pub use error::IoError;
pub use pos::Pos;
pub use source::{LineView, SourceBuffer, UTF8_BOM};
