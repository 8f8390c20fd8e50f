//! INI-style configuration file parsing.
//!
//! Grammar: `[section]` headings, `key = value` entries, comments starting
//! with `#`, `;`, or `//` outside quotes, quoted values with escapes, and
//! `@include "path"` directives resolved against the including file's
//! directory. A UTF-8 BOM at the start of a file is stripped. Errors carry
//! `path:line_no`.

use std::fs;
use std::path::{Path, PathBuf};

use vitlc_util::UTF8_BOM;

use crate::error::ConfigError;
use crate::Config;

/// Maximum `@include` nesting. Exceeding it is an explicit error, never a
/// silent truncation.
pub const MAX_INCLUDE_DEPTH: u32 = 16;

pub(crate) fn load_into(config: &mut Config, path: &Path, depth: u32) -> Result<(), ConfigError> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    let content = bytes
        .strip_prefix(UTF8_BOM.as_slice())
        .unwrap_or(&bytes[..]);
    let text = String::from_utf8_lossy(content);

    let mut section = String::new();
    for (index, raw_line) in text.lines().enumerate() {
        let line_no = (index + 1) as u32;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let Some(name) = rest.strip_suffix(']') else {
                return Err(parse_error(&display, line_no, "unmatched '[' in section heading"));
            };
            section = name.trim().to_ascii_lowercase();
            continue;
        }

        if let Some(rest) = line.strip_prefix("@include") {
            let target = parse_include_path(rest.trim())
                .ok_or_else(|| parse_error(&display, line_no, "malformed @include directive"))?;
            if depth >= MAX_INCLUDE_DEPTH {
                return Err(ConfigError::IncludeDepth {
                    path: display,
                    line: line_no,
                });
            }
            let resolved = resolve_include(path, &target);
            load_into(config, &resolved, depth + 1)?;
            continue;
        }

        let Some((key_part, value_part)) = line.split_once('=') else {
            return Err(parse_error(&display, line_no, "missing '=' in entry"));
        };
        let key = key_part.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(parse_error(&display, line_no, "empty key"));
        }
        let value = parse_value(value_part.trim())
            .ok_or_else(|| parse_error(&display, line_no, "unterminated quoted value"))?;

        let canonical = if section.is_empty() {
            key
        } else {
            format!("{section}.{key}")
        };
        config.set(canonical, value);
    }
    Ok(())
}

fn parse_error(path: &str, line: u32, message: &str) -> ConfigError {
    ConfigError::Parse {
        path: path.to_string(),
        line,
        message: message.to_string(),
    }
}

/// Cuts the line at the first comment marker outside quotes.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_single || in_double => escaped = true,
            b'\'' if !in_double => in_single = !in_single,
            b'"' if !in_single => in_double = !in_double,
            b'#' | b';' if !in_single && !in_double => return &line[..i],
            b'/' if !in_single && !in_double && bytes.get(i + 1) == Some(&b'/') => {
                return &line[..i];
            }
            _ => {}
        }
    }
    line
}

/// Unquotes and unescapes a value; a bare value passes through.
fn parse_value(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let quote = match bytes.first() {
        Some(&q @ (b'"' | b'\'')) => q,
        _ => return Some(text.to_string()),
    };
    if bytes.len() < 2 || bytes.last() != Some(&quote) {
        return None;
    }
    let inner = &text[1..text.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(out)
}

/// Extracts the quoted path of an `@include` directive.
fn parse_include_path(rest: &str) -> Option<String> {
    let bytes = rest.as_bytes();
    let quote = match bytes.first() {
        Some(&q @ (b'"' | b'\'')) => q,
        _ => return None,
    };
    if bytes.len() < 2 || bytes.last() != Some(&quote) {
        return None;
    }
    Some(rest[1..rest.len() - 1].to_string())
}

/// Resolves an include target against the including file's directory.
/// Absolute paths bypass resolution.
fn resolve_include(including: &Path, target: &str) -> PathBuf {
    let target_path = Path::new(target);
    if target_path.is_absolute() {
        return target_path.to_path_buf();
    }
    match including.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(target_path),
        _ => target_path.to_path_buf(),
    }
}
