//! Numeric literal lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'src> Lexer<'src> {
    /// Lexes an integer or float literal.
    ///
    /// Handles `0x`/`0X` hex and `0b`/`0B` binary prefixes, decimal
    /// integers, and floats with an optional fraction and exponent.
    /// Underscores inside digit runs are ignored. A `.` only starts a
    /// fraction when the following byte is not another `.`, so `1..3`
    /// stays a range expression. An exponent marker with no digits after
    /// it is rewound and left for the next token.
    pub(crate) fn lex_number(&mut self) -> Token<'src> {
        if self.cursor.first() == b'0' {
            match self.cursor.at(1) {
                b'x' | b'X' => {
                    self.cursor.advance_by(2);
                    return self.lex_radix(16, "invalid hex literal");
                }
                b'b' | b'B' => {
                    self.cursor.advance_by(2);
                    return self.lex_radix(2, "invalid binary literal");
                }
                _ => {}
            }
        }

        self.eat_decimal_digits();

        let mut is_float = false;
        if self.cursor.first() == b'.' && self.cursor.at(1) != b'.' {
            is_float = true;
            self.cursor.advance();
            self.eat_decimal_digits();
        }

        if matches!(self.cursor.first(), b'e' | b'E') {
            let before_exponent = self.cursor.snapshot();
            self.cursor.advance();
            if matches!(self.cursor.first(), b'+' | b'-') {
                self.cursor.advance();
            }
            let digits_start = self.cursor.offset();
            while self.cursor.first().is_ascii_digit() {
                self.cursor.advance();
            }
            if self.cursor.offset() == digits_start {
                // `1e` or `1e+` with nothing after: the literal ends before
                // the marker, which then lexes on its own.
                self.cursor.restore(before_exponent);
            } else {
                is_float = true;
            }
        }

        let text = self.digits_text();
        if is_float {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => self.make(TokenKind::Float(value)),
                _ => self.error_token("float literal out of range"),
            }
        } else {
            match text.parse::<u64>() {
                Ok(value) => self.make(TokenKind::Int(value)),
                Err(_) => self.error_token("integer overflow"),
            }
        }
    }

    /// Lexes the digits of a based literal, after its `0x`/`0b` prefix.
    fn lex_radix(&mut self, base: u32, invalid_message: &str) -> Token<'src> {
        let digits_start = self.cursor.offset();
        loop {
            let b = self.cursor.first();
            let is_digit = match base {
                16 => b.is_ascii_hexdigit(),
                _ => b == b'0' || b == b'1',
            };
            if is_digit || b == b'_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let digits = self.cursor.slice_from(digits_start);
        if digits.iter().all(|&b| b == b'_') {
            return self.error_token(invalid_message);
        }

        let text: String = digits
            .iter()
            .filter(|&&b| b != b'_')
            .map(|&b| b as char)
            .collect();
        match u64::from_str_radix(&text, base) {
            Ok(value) => self.make(TokenKind::Int(value)),
            Err(_) => self.error_token("integer overflow"),
        }
    }

    fn eat_decimal_digits(&mut self) {
        while self.cursor.first().is_ascii_digit() || self.cursor.first() == b'_' {
            self.cursor.advance();
        }
    }

    /// The lexeme so far with underscores removed, ready for parsing.
    fn digits_text(&self) -> String {
        self.cursor
            .slice_from(self.token_start.offset)
            .iter()
            .filter(|&&b| b != b'_')
            .map(|&b| b as char)
            .collect()
    }
}
