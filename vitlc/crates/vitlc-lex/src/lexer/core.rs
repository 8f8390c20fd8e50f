//! Core lexer: dispatch, lookahead, and the `expect` helper.

use vitlc_util::{utf8, Pos, SourceBuffer, UTF8_BOM};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// The Vitl lexer.
///
/// One instance lexes one source buffer front to back. The stream is total:
/// faults come back as [`TokenKind::Error`] tokens and the lexer keeps
/// going, never panicking and never reading past the buffer end. A single
/// token of lookahead is available through [`Lexer::peek`].
pub struct Lexer<'src> {
    /// Byte cursor over the source.
    pub(crate) cursor: Cursor<'src>,

    /// Position where the current token started.
    pub(crate) token_start: Pos,

    /// Cached lookahead token, if `peek` ran since the last `next_token`.
    peeked: Option<Token<'src>>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source`, positioned at `(1,1,0)`.
    pub fn new(source: &'src SourceBuffer) -> Self {
        Self {
            cursor: Cursor::new(source.as_bytes()),
            token_start: Pos::START,
            peeked: None,
        }
    }

    /// Consumes and returns the next token.
    ///
    /// Skips whitespace and comments first; returns `Eof` forever once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Token<'src> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.scan_token(),
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// The token is cached: the following `next_token` returns this same
    /// token, and repeated peeks are free.
    pub fn peek(&mut self) -> &Token<'src> {
        if self.peeked.is_none() {
            self.peeked = Some(self.scan_token());
        }
        match self.peeked.as_ref() {
            Some(token) => token,
            None => unreachable!(),
        }
    }

    /// Consumes the next token, failing unless it matches `kind`.
    ///
    /// Matching is by category ([`TokenKind::same_kind`]): payloads are
    /// ignored except that keywords must match exactly.
    pub fn expect(&mut self, kind: &TokenKind<'src>) -> Result<Token<'src>, LexError> {
        let token = self.next_token();
        if token.kind.same_kind(kind) {
            Ok(token)
        } else {
            Err(LexError::UnexpectedToken {
                pos: token.pos,
                expected: kind.dump_name().to_string(),
                found: token.kind.dump_name().to_string(),
            })
        }
    }

    fn scan_token(&mut self) -> Token<'src> {
        // A BOM that survived to lex time is unknown content, not trivia.
        if self.cursor.offset() == 0 && self.cursor.remaining().starts_with(UTF8_BOM) {
            self.token_start = self.cursor.pos();
            self.cursor.advance_by(UTF8_BOM.len());
            return self.error_token("unexpected UTF-8 byte order mark");
        }

        if let Some(error) = self.skip_trivia() {
            return error;
        }

        self.token_start = self.cursor.pos();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        match self.cursor.first() {
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'+' => self.lex_plus(),
            b'-' => self.lex_minus(),
            b'*' => self.lex_star(),
            b'/' => self.lex_slash(),
            b'%' => self.lex_percent(),
            b'=' => self.lex_equals(),
            b'!' => self.lex_bang(),
            b'<' => self.lex_less(),
            b'>' => self.lex_greater(),
            b'&' => self.lex_amp(),
            b'|' => self.lex_pipe(),
            b'^' => self.lex_caret(),
            b':' => self.lex_colon(),
            b'.' => self.lex_dot(),
            b'"' => self.lex_string(),
            b'\'' => self.lex_char(),
            b'0'..=b'9' => self.lex_number(),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.lex_identifier(),
            b if b < 0x80 => {
                self.cursor.advance();
                if b.is_ascii_graphic() {
                    self.error_token(format!("unexpected character '{}'", b as char))
                } else {
                    self.error_token(format!("unexpected character 0x{b:02X}"))
                }
            }
            b => match utf8::decode_at(self.cursor.remaining(), 0) {
                Ok((c, width)) => {
                    self.cursor.advance_by(width);
                    self.error_token(format!("unexpected character '{c}'"))
                }
                Err(_) => {
                    self.cursor.advance();
                    self.error_token(format!("invalid UTF-8 byte 0x{b:02X}"))
                }
            },
        }
    }

    /// Finishes the current token with the bytes consumed since
    /// `token_start`.
    pub(crate) fn make(&mut self, kind: TokenKind<'src>) -> Token<'src> {
        Token {
            kind,
            pos: self.token_start,
            raw: self.cursor.slice_from(self.token_start.offset),
        }
    }

    fn single(&mut self, kind: TokenKind<'src>) -> Token<'src> {
        self.cursor.advance();
        self.make(kind)
    }

    /// Finishes the current token as an `Error` carrying `message`.
    pub(crate) fn error_token(&mut self, message: impl Into<String>) -> Token<'src> {
        self.make(TokenKind::Error(message.into()))
    }
}

/// Iterates tokens up to (not including) `Eof`.
impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
