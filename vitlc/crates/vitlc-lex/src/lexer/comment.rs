//! Whitespace and comment skipping.

use crate::token::Token;
use crate::Lexer;

impl<'src> Lexer<'src> {
    /// Skips whitespace and comments before the next token.
    ///
    /// Returns an error token when a block comment is still open at EOF;
    /// `token_start` is then the position of its opening `/*`.
    pub(crate) fn skip_trivia(&mut self) -> Option<Token<'src>> {
        loop {
            match self.cursor.first() {
                b' ' | b'\t' | b'\r' | b'\n' => self.cursor.advance(),
                b'/' if self.cursor.at(1) == b'/' => self.skip_line_comment(),
                b'/' if self.cursor.at(1) == b'*' => {
                    self.token_start = self.cursor.pos();
                    if !self.skip_block_comment() {
                        return Some(self.error_token("unclosed block comment"));
                    }
                }
                _ => return None,
            }
        }
    }

    /// Skips `//` (including `//!`) to the end of the line.
    fn skip_line_comment(&mut self) {
        self.cursor.advance_by(2);
        while !self.cursor.is_at_end() && self.cursor.first() != b'\n' {
            self.cursor.advance();
        }
    }

    /// Skips a `/* */` comment, counting nested openers.
    ///
    /// Returns false when EOF arrives before the depth reaches zero.
    fn skip_block_comment(&mut self) -> bool {
        self.cursor.advance_by(2);
        let mut depth = 1u32;
        while depth > 0 && !self.cursor.is_at_end() {
            if self.cursor.first() == b'/' && self.cursor.at(1) == b'*' {
                self.cursor.advance_by(2);
                depth += 1;
            } else if self.cursor.first() == b'*' && self.cursor.at(1) == b'/' {
                self.cursor.advance_by(2);
                depth -= 1;
            } else {
                self.cursor.advance();
            }
        }
        depth == 0
    }
}
