//! String and character literal lexing.
//!
//! Scanning validates escapes and control bytes but does not build the
//! decoded contents; string tokens keep their raw slice (quotes included)
//! and [`crate::decode::decode_string`] runs on demand.

use vitlc_util::utf8;

use crate::decode::unescape_at;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'src> Lexer<'src> {
    /// Lexes a double-quoted string literal.
    ///
    /// Bytes `>= 0x20` (including multi-byte UTF-8 sequences) pass through;
    /// raw control bytes, EOF, and a bare newline all end the literal with
    /// an error token.
    pub(crate) fn lex_string(&mut self) -> Token<'src> {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                return self.error_token("unterminated or invalid string literal");
            }
            match self.cursor.first() {
                b'"' => {
                    self.cursor.advance();
                    return self.make(TokenKind::Str);
                }
                b'\\' => match unescape_at(self.cursor.remaining(), 0) {
                    Ok((_, consumed)) => self.cursor.advance_by(consumed),
                    Err(message) => {
                        self.cursor.advance_by(2);
                        return self.error_token(message);
                    }
                },
                b if b < 0x20 => {
                    return self.error_token("unterminated or invalid string literal");
                }
                _ => self.cursor.advance(),
            }
        }
    }

    /// Lexes a single-quoted character literal.
    ///
    /// Exactly one decoded byte: an escape or a single ASCII byte. The
    /// decoded value is stored in the token, and `decode_char` recomputes
    /// it from the raw slice on demand.
    pub(crate) fn lex_char(&mut self) -> Token<'src> {
        self.cursor.advance();

        if self.cursor.is_at_end() {
            return self.error_token("unterminated or invalid character literal");
        }

        let decoded = match self.cursor.first() {
            b'\'' => {
                self.cursor.advance();
                return self.error_token("empty character literal");
            }
            b'\\' => match unescape_at(self.cursor.remaining(), 0) {
                Ok((byte, consumed)) => {
                    self.cursor.advance_by(consumed);
                    byte
                }
                Err(message) => {
                    self.cursor.advance_by(2);
                    return self.error_token(message);
                }
            },
            b if b < 0x20 => {
                return self.error_token("unterminated or invalid character literal");
            }
            b if b >= 0x80 => {
                let width = utf8::decode_at(self.cursor.remaining(), 0)
                    .map(|(_, w)| w)
                    .unwrap_or(1);
                self.cursor.advance_by(width);
                return self.error_token("character literal must be a single byte");
            }
            b => {
                self.cursor.advance();
                b
            }
        };

        if self.cursor.match_byte(b'\'') {
            self.make(TokenKind::Char(decoded))
        } else {
            self.error_token("unterminated or invalid character literal")
        }
    }
}
