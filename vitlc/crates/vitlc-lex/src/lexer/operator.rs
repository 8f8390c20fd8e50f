//! Operator and delimiter lexing.
//!
//! Longest match first: three-byte forms (`<<=`, `>>=`, `..=`), then
//! two-byte, then single bytes. Each function owns one leading byte.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'src> Lexer<'src> {
    /// `+`, `+=`
    pub(crate) fn lex_plus(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::PlusEq)
        } else {
            self.make(TokenKind::Plus)
        }
    }

    /// `-`, `->`, `-=`
    pub(crate) fn lex_minus(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'>') {
            self.make(TokenKind::Arrow)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::MinusEq)
        } else {
            self.make(TokenKind::Minus)
        }
    }

    /// `*`, `*=`
    pub(crate) fn lex_star(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::StarEq)
        } else {
            self.make(TokenKind::Star)
        }
    }

    /// `/`, `/=` (comments were consumed as trivia)
    pub(crate) fn lex_slash(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::SlashEq)
        } else {
            self.make(TokenKind::Slash)
        }
    }

    /// `%`, `%=`
    pub(crate) fn lex_percent(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::PercentEq)
        } else {
            self.make(TokenKind::Percent)
        }
    }

    /// `=`, `==`, `=>`
    pub(crate) fn lex_equals(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::EqEq)
        } else if self.cursor.match_byte(b'>') {
            self.make(TokenKind::FatArrow)
        } else {
            self.make(TokenKind::Eq)
        }
    }

    /// `!`, `!=`
    pub(crate) fn lex_bang(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::NotEq)
        } else {
            self.make(TokenKind::Bang)
        }
    }

    /// `<`, `<=`, `<<`, `<<=`
    pub(crate) fn lex_less(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::LtEq)
        } else if self.cursor.match_byte(b'<') {
            if self.cursor.match_byte(b'=') {
                self.make(TokenKind::ShlEq)
            } else {
                self.make(TokenKind::Shl)
            }
        } else {
            self.make(TokenKind::Lt)
        }
    }

    /// `>`, `>=`, `>>`, `>>=`
    pub(crate) fn lex_greater(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::GtEq)
        } else if self.cursor.match_byte(b'>') {
            if self.cursor.match_byte(b'=') {
                self.make(TokenKind::ShrEq)
            } else {
                self.make(TokenKind::Shr)
            }
        } else {
            self.make(TokenKind::Gt)
        }
    }

    /// `&`, `&&`, `&=`
    pub(crate) fn lex_amp(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'&') {
            self.make(TokenKind::AndAnd)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::AmpEq)
        } else {
            self.make(TokenKind::Amp)
        }
    }

    /// `|`, `||`, `|=`
    pub(crate) fn lex_pipe(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'|') {
            self.make(TokenKind::OrOr)
        } else if self.cursor.match_byte(b'=') {
            self.make(TokenKind::PipeEq)
        } else {
            self.make(TokenKind::Pipe)
        }
    }

    /// `^`, `^=`
    pub(crate) fn lex_caret(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::CaretEq)
        } else {
            self.make(TokenKind::Caret)
        }
    }

    /// `:`, `::`
    pub(crate) fn lex_colon(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b':') {
            self.make(TokenKind::ColonColon)
        } else {
            self.make(TokenKind::Colon)
        }
    }

    /// `.`, `..`, `..=`
    pub(crate) fn lex_dot(&mut self) -> Token<'src> {
        self.cursor.advance();
        if self.cursor.match_byte(b'.') {
            if self.cursor.match_byte(b'=') {
                self.make(TokenKind::DotDotEq)
            } else {
                self.make(TokenKind::DotDot)
            }
        } else {
            self.make(TokenKind::Dot)
        }
    }
}
