//! Filesystem helpers for the driver.
//!
//! Small, path-string based equivalents of `dirname` and `mkdir -p`, plus a
//! truncating whole-file write that accepts the `-` sentinel for stdout.

use std::fs;
use std::io::{self, Write};

use crate::error::IoError;

/// Sentinel path selecting a standard stream instead of the filesystem.
pub const STDIO_PATH: &str = "-";

/// Returns the directory component of `path`.
///
/// Trailing separators are stripped first; a path with no separator yields
/// `"."`, and the root stays `"/"`.
///
/// # Examples
///
/// ```
/// use vitlc_util::fsx::dirname;
///
/// assert_eq!(dirname("out/a.out"), "out");
/// assert_eq!(dirname("a.out"), ".");
/// assert_eq!(dirname("/a"), "/");
/// ```
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    match trimmed.rfind(['/', '\\']) {
        None => ".",
        Some(0) => "/",
        Some(i) => &trimmed[..i],
    }
}

/// Creates `path` and every missing parent, like `mkdir -p`.
///
/// Backslashes are treated as separators for iteration on every platform;
/// a component that already exists is success. Idempotent.
pub fn mkdir_p(path: &str) -> Result<(), IoError> {
    if path.is_empty() || path == "." {
        return Ok(());
    }
    let normalized: String = if cfg!(windows) {
        path.to_string()
    } else {
        path.replace('\\', "/")
    };

    let mut prefix = String::with_capacity(normalized.len());
    for component in normalized.split('/') {
        if component.is_empty() {
            // Leading slash: keep the root in the prefix once.
            if prefix.is_empty() {
                prefix.push('/');
            }
            continue;
        }
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        prefix.push_str(component);
        if component == "." || component.ends_with(':') {
            continue;
        }
        match fs::create_dir(&prefix) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(IoError::new(prefix, e)),
        }
    }
    Ok(())
}

/// Writes `bytes` to `path`, creating parent directories as needed.
///
/// The file is opened in truncating binary mode, so an existing file is
/// replaced. `-` writes the bytes to standard output instead.
pub fn write_all(path: &str, bytes: &[u8]) -> Result<(), IoError> {
    if path == STDIO_PATH {
        let mut out = io::stdout().lock();
        return out
            .write_all(bytes)
            .and_then(|_| out.flush())
            .map_err(|e| IoError::new(STDIO_PATH, e));
    }

    mkdir_p(dirname(path))?;
    let mut file = fs::File::create(path).map_err(|e| IoError::new(path, e))?;
    file.write_all(bytes).map_err(|e| IoError::new(path, e))
}
