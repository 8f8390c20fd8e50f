//! Caret diagnostics.
//!
//! One positioned error is rendered as three lines: the `error:line:col:`
//! header, the offending source line, and a caret under the column. Colour
//! is decided once by the driver and threaded through as a value; there is
//! no global colour state.

use std::env;

use crate::pos::Pos;
use crate::source::SourceBuffer;
use crate::utf8;

const ANSI_RED_BOLD: &str = "\x1b[1;31m";
const ANSI_RESET: &str = "\x1b[0m";

/// When to emit ANSI colour codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChoice {
    /// Colour when the sink is a terminal and `NO_COLOR` is unset.
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl ColorChoice {
    /// Resolves the choice against the sink.
    ///
    /// A non-empty `NO_COLOR` environment variable disables colour for
    /// `Auto`, per the convention.
    pub fn enabled(self, sink_is_terminal: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                let no_color = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
                sink_is_terminal && !no_color
            }
        }
    }
}

/// A positioned error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the error starts.
    pub pos: Pos,
    /// What went wrong.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic at a position.
    pub fn new(pos: Pos, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }

    /// Renders the header line without source context.
    pub fn header(&self, color: bool) -> String {
        if color {
            format!(
                "{}error{}:{}:{}: {}",
                ANSI_RED_BOLD, ANSI_RESET, self.pos.line, self.pos.column, self.message
            )
        } else {
            format!(
                "error:{}:{}: {}",
                self.pos.line, self.pos.column, self.message
            )
        }
    }

    /// Renders the three-line form: header, source line, caret.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitlc_util::{Diagnostic, Pos, SourceBuffer};
    ///
    /// let src = SourceBuffer::from_bytes("demo.vitl", b"let x = @\n".to_vec());
    /// let diag = Diagnostic::new(Pos::new(1, 9, 8), "unexpected character '@'");
    /// let text = diag.render(&src, false);
    /// assert_eq!(
    ///     text,
    ///     "error:1:9: unexpected character '@'\nlet x = @\n        ^"
    /// );
    /// ```
    pub fn render(&self, source: &SourceBuffer, color: bool) -> String {
        let view = source.extract_line(self.pos.offset);
        let line_text = utf8::sanitize(view.text);
        let caret_pad = " ".repeat((view.column as usize).saturating_sub(1));
        format!("{}\n{}\n{}^", self.header(color), line_text, caret_pad)
    }
}
