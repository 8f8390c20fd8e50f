//! Source buffer.
//!
//! The buffer owns the raw bytes of one compilation input and is the only
//! allocation tokens ever point into. Positions are computed over raw bytes;
//! nothing downstream requires a trailing NUL or valid UTF-8.

use std::fs::File;
use std::io::{self, Read};

use crate::error::IoError;
use crate::fsx::STDIO_PATH;

/// The UTF-8 byte order mark. Config files strip it; the lexer rejects it.
pub const UTF8_BOM: &[u8; 3] = &[0xEF, 0xBB, 0xBF];

/// Initial read buffer size; doubled whenever the buffer fills up.
const INITIAL_CAPACITY: usize = 16 * 1024;

/// An immutable, owned source input.
///
/// # Examples
///
/// ```
/// use vitlc_util::SourceBuffer;
///
/// let buf = SourceBuffer::from_bytes("demo.vitl", b"let x = 1\n".to_vec());
/// assert_eq!(buf.len(), 10);
/// assert_eq!(buf.byte_at(0), Some(b'l'));
/// ```
#[derive(Debug)]
pub struct SourceBuffer {
    name: String,
    bytes: Vec<u8>,
}

impl SourceBuffer {
    /// Reads a whole file, or standard input to EOF when `path` is `-`.
    pub fn read(path: &str) -> Result<Self, IoError> {
        let bytes = if path == STDIO_PATH {
            read_growing(io::stdin().lock())
        } else {
            File::open(path).and_then(read_growing)
        }
        .map_err(|e| IoError::new(path, e))?;

        Ok(Self {
            name: path.to_string(),
            bytes,
        })
    }

    /// Wraps bytes already in memory (tests, include expansion).
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// The display name this buffer was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for an empty input.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The byte at `offset`, if in bounds.
    #[inline]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// Returns true when the buffer starts with a UTF-8 byte order mark.
    pub fn starts_with_bom(&self) -> bool {
        self.bytes.starts_with(UTF8_BOM)
    }

    /// Extracts the line enclosing `offset` for diagnostic display.
    ///
    /// The line runs from the byte after the preceding `\n` up to (not
    /// including) the following `\n`. The returned column is the 1-based
    /// byte column of `offset` within that line.
    pub fn extract_line(&self, offset: usize) -> LineView<'_> {
        let offset = offset.min(self.bytes.len());
        let start = self.bytes[..offset]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let end = self.bytes[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |i| offset + i);

        LineView {
            text: &self.bytes[start..end],
            column: (offset - start + 1) as u32,
        }
    }
}

/// One line of source, as raw bytes, plus the byte column of the requested
/// offset within it.
pub struct LineView<'a> {
    /// The line content without its terminating newline.
    pub text: &'a [u8],
    /// 1-based byte column of the offset the view was extracted for.
    pub column: u32,
}

/// Reads a stream to EOF into an exponentially growing buffer.
fn read_growing<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; INITIAL_CAPACITY];
    let mut filled = 0;
    loop {
        if filled == buf.len() {
            let doubled = buf.len() * 2;
            buf.resize(doubled, 0);
        }
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_bytes() {
        let buf = SourceBuffer::from_bytes("x", b"abc".to_vec());
        assert_eq!(buf.name(), "x");
        assert_eq!(buf.len(), 3);
        assert!(!buf.is_empty());
        assert_eq!(buf.byte_at(2), Some(b'c'));
        assert_eq!(buf.byte_at(3), None);
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.vitl");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"let x = 1\n").unwrap();
        drop(f);

        let buf = SourceBuffer::read(path.to_str().unwrap()).unwrap();
        assert_eq!(buf.as_bytes(), b"let x = 1\n");
    }

    #[test]
    fn test_read_missing_file() {
        let err = SourceBuffer::read("/nonexistent/input.vitl").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/input.vitl"));
    }

    #[test]
    fn test_read_larger_than_initial_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.vitl");
        let payload = vec![b'x'; INITIAL_CAPACITY * 3 + 17];
        std::fs::write(&path, &payload).unwrap();

        let buf = SourceBuffer::read(path.to_str().unwrap()).unwrap();
        assert_eq!(buf.len(), payload.len());
        assert_eq!(buf.as_bytes(), &payload[..]);
    }

    #[test]
    fn test_bom_detection() {
        let with_bom = SourceBuffer::from_bytes("x", b"\xEF\xBB\xBFlet".to_vec());
        assert!(with_bom.starts_with_bom());
        let without = SourceBuffer::from_bytes("x", b"let".to_vec());
        assert!(!without.starts_with_bom());
    }

    #[test]
    fn test_extract_line_first() {
        let buf = SourceBuffer::from_bytes("x", b"let x = 1\nlet y = 2\n".to_vec());
        let view = buf.extract_line(4);
        assert_eq!(view.text, b"let x = 1");
        assert_eq!(view.column, 5);
    }

    #[test]
    fn test_extract_line_second() {
        let buf = SourceBuffer::from_bytes("x", b"let x = 1\nlet y = 2\n".to_vec());
        let view = buf.extract_line(14);
        assert_eq!(view.text, b"let y = 2");
        assert_eq!(view.column, 5);
    }

    #[test]
    fn test_extract_line_at_newline() {
        let buf = SourceBuffer::from_bytes("x", b"ab\ncd".to_vec());
        // Offset of the '\n' itself belongs to the first line, one past it.
        let view = buf.extract_line(2);
        assert_eq!(view.text, b"ab");
        assert_eq!(view.column, 3);
    }

    #[test]
    fn test_extract_line_past_end() {
        let buf = SourceBuffer::from_bytes("x", b"ab".to_vec());
        let view = buf.extract_line(100);
        assert_eq!(view.text, b"ab");
        assert_eq!(view.column, 3);
    }

    #[test]
    fn test_extract_line_empty_buffer() {
        let buf = SourceBuffer::from_bytes("x", Vec::new());
        let view = buf.extract_line(0);
        assert_eq!(view.text, b"");
        assert_eq!(view.column, 1);
    }
}
