//! Identifier and keyword lexing.

use crate::token::{Keyword, Token, TokenKind};
use crate::Lexer;

impl<'src> Lexer<'src> {
    /// Lexes `[A-Za-z_][A-Za-z0-9_]*` and classifies the spelling.
    ///
    /// Keywords come from the fixed table; `true` and `false` remap to
    /// boolean literals; everything else is an identifier borrowing its
    /// spelling from the source buffer.
    pub(crate) fn lex_identifier(&mut self) -> Token<'src> {
        while matches!(
            self.cursor.first(),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_'
        ) {
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(self.token_start.offset);
        let kind = match std::str::from_utf8(raw) {
            Ok("true") => TokenKind::Bool(true),
            Ok("false") => TokenKind::Bool(false),
            Ok(text) => match Keyword::from_ident(text) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Ident(text),
            },
            // Unreachable for the ASCII run above; kept total.
            Err(_) => TokenKind::Error("identifier is not valid UTF-8".to_string()),
        };
        self.make(kind)
    }
}
