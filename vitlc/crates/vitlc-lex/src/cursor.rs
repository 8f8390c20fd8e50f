//! Byte cursor for traversing source input.
//!
//! The cursor tracks position state while the lexer walks raw bytes. Columns
//! are counted in bytes: every non-newline byte advances the column by one,
//! `\n` bumps the line and resets the column to 1. Multi-byte sequences are
//! the caller's concern; the cursor never looks inside them.

use vitlc_util::Pos;

/// A cursor over the bytes of one source buffer.
///
/// # Example
///
/// ```
/// use vitlc_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"let x = 42;");
/// assert_eq!(cursor.first(), b'l');
/// cursor.advance();
/// assert_eq!(cursor.first(), b'e');
/// ```
pub struct Cursor<'src> {
    bytes: &'src [u8],
    offset: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at position `(1,1,0)`.
    pub fn new(bytes: &'src [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The current byte, or 0 at the end of input.
    ///
    /// Callers that care about a literal NUL byte must pair this with
    /// [`Cursor::is_at_end`].
    #[inline]
    pub fn first(&self) -> u8 {
        self.at(0)
    }

    /// The byte `n` positions ahead, or 0 past the end.
    #[inline]
    pub fn at(&self, n: usize) -> u8 {
        self.bytes
            .get(self.offset + n)
            .copied()
            .unwrap_or(0)
    }

    /// Returns true when every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Consumes one byte, updating line/column tracking.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(&b) = self.bytes.get(self.offset) {
            self.offset += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes up to `n` bytes.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Consumes the current byte if it equals `expected`.
    #[inline]
    pub fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.first() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// The current position.
    pub fn pos(&self) -> Pos {
        Pos::new(self.line, self.column, self.offset)
    }

    /// The current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The bytes from `start` up to the current offset.
    pub fn slice_from(&self, start: usize) -> &'src [u8] {
        &self.bytes[start..self.offset]
    }

    /// The unconsumed remainder of the input.
    pub fn remaining(&self) -> &'src [u8] {
        &self.bytes[self.offset..]
    }

    /// Saves the cursor state for later restore.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Rewinds to a previously saved state.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.offset = snapshot.offset;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// A saved cursor state.
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    offset: usize,
    line: u32,
    column: u32,
}
