//! Validated UTF-8 decoding helpers.
//!
//! The lexer and the diagnostic renderer both walk raw bytes; when they meet
//! a non-ASCII byte they need to know whether it starts a well-formed code
//! point and how wide it is. `std` only offers whole-slice validation, so the
//! single-code-point decoder lives here.

use thiserror::Error;

/// A malformed UTF-8 sequence at a known offset.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid UTF-8 sequence at byte offset {offset}")]
pub struct Utf8Error {
    /// Offset of the first offending byte.
    pub offset: usize,
}

/// Returns true for UTF-8 continuation bytes (`0b10xx_xxxx`).
#[inline]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes the code point starting at `offset`.
///
/// Returns the scalar value and its encoded width in bytes. Overlong forms,
/// surrogates, and truncated sequences are rejected.
///
/// # Examples
///
/// ```
/// use vitlc_util::utf8::decode_at;
///
/// assert_eq!(decode_at(b"a", 0).unwrap(), ('a', 1));
/// assert_eq!(decode_at("é".as_bytes(), 0).unwrap(), ('é', 2));
/// assert!(decode_at(&[0xFF], 0).is_err());
/// ```
pub fn decode_at(bytes: &[u8], offset: usize) -> Result<(char, usize), Utf8Error> {
    let err = Utf8Error { offset };
    let first = *bytes.get(offset).ok_or(err)?;

    if first < 0x80 {
        return Ok((first as char, 1));
    }

    let width = match first {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        // Continuation byte, overlong lead (C0/C1), or out of range (F5+).
        _ => return Err(err),
    };

    let rest = bytes.get(offset + 1..offset + width).ok_or(err)?;
    if !rest.iter().all(|&b| is_continuation(b)) {
        return Err(err);
    }

    let cp = match width {
        2 => (u32::from(first & 0x1F) << 6) | u32::from(rest[0] & 0x3F),
        3 => {
            // E0 requires A0.. to exclude overlong forms, ED excludes surrogates.
            if (first == 0xE0 && rest[0] < 0xA0) || (first == 0xED && rest[0] >= 0xA0) {
                return Err(err);
            }
            (u32::from(first & 0x0F) << 12)
                | (u32::from(rest[0] & 0x3F) << 6)
                | u32::from(rest[1] & 0x3F)
        }
        _ => {
            if (first == 0xF0 && rest[0] < 0x90) || (first == 0xF4 && rest[0] >= 0x90) {
                return Err(err);
            }
            (u32::from(first & 0x07) << 18)
                | (u32::from(rest[0] & 0x3F) << 12)
                | (u32::from(rest[1] & 0x3F) << 6)
                | u32::from(rest[2] & 0x3F)
        }
    };

    char::from_u32(cp).map(|c| (c, width)).ok_or(err)
}

/// Encodes a scalar value into the provided buffer and returns the encoded
/// bytes as a string slice.
#[inline]
pub fn encode(c: char, buf: &mut [u8; 4]) -> &str {
    c.encode_utf8(buf)
}

/// Converts raw line bytes to text, replacing every malformed sequence with
/// U+FFFD so diagnostics can echo arbitrary input safely.
pub fn sanitize(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut offset = 0;
    while offset < bytes.len() {
        match decode_at(bytes, offset) {
            Ok((c, width)) => {
                out.push(c);
                offset += width;
            }
            Err(_) => {
                out.push('\u{FFFD}');
                offset += 1;
            }
        }
    }
    out
}
