//! vitlc-cfg - Layered configuration for the Vitte/Vitl toolchain.
//!
//! A configuration is a flat map from canonical keys (lowercase, dotted:
//! `db.host`) to string values, merged from three sources in order of
//! increasing precedence: INI files (with `@include`), a prefixed view of
//! the process environment, and `--key=value` argv flags. Later writes
//! overwrite earlier ones. Typed accessors coerce values on read, and
//! `${KEY}` references expand against the map and the environment.
//!
//! ```
//! use vitlc_cfg::Config;
//!
//! let mut config = Config::new();
//! config.load_env_from("APP_", [("APP_DB__PORT".to_string(), "2".to_string())]);
//! config.load_argv(["--db.host=b"]);
//! assert_eq!(config.get("db.port"), Some("2"));
//! assert_eq!(config.get("db.host"), Some("b"));
//! ```

mod error;
mod expand;
mod file;
mod serialize;
pub mod value;

use std::path::Path;

use indexmap::IndexMap;

pub use error::ConfigError;
pub use expand::MAX_EXPAND_DEPTH;
pub use file::MAX_INCLUDE_DEPTH;

/// A canonical key → value map.
///
/// Iteration order is stable (insertion order); serialization sorts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    entries: IndexMap<String, String>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites an entry. The key is canonicalized to
    /// lowercase.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Looks up a raw value by canonical key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entries are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ----- Loaders (applied in order: files, then env, then argv) -----

    /// Loads an INI file, following `@include` directives.
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        file::load_into(self, path, 0)
    }

    /// Loads environment variables starting with `prefix`.
    ///
    /// The prefix match is case-insensitive; the remainder maps `__` to `.`
    /// and lowercases, so `APP_DB__HOST` becomes `db.host`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_env_from(prefix, std::env::vars());
    }

    /// Like [`Config::load_env`], over an explicit variable list.
    pub fn load_env_from(
        &mut self,
        prefix: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) {
        for (name, value) in vars {
            let Some(head) = name.get(..prefix.len()) else {
                continue;
            };
            if !head.eq_ignore_ascii_case(prefix) {
                continue;
            }
            let key = name[prefix.len()..].replace("__", ".").to_ascii_lowercase();
            if !key.is_empty() {
                self.set(key, value);
            }
        }
    }

    /// Loads `--key=value`, `--flag` (→ `"1"`), and `--no-flag` (→ `"0"`)
    /// arguments. Anything not starting with `--` is ignored.
    pub fn load_argv<'a>(&mut self, args: impl IntoIterator<Item = &'a str>) {
        for arg in args {
            let Some(body) = arg.strip_prefix("--") else {
                continue;
            };
            if let Some((key, value)) = body.split_once('=') {
                self.set(key, value);
            } else if let Some(flag) = body.strip_prefix("no-") {
                self.set(flag, "0");
            } else if !body.is_empty() {
                self.set(body, "1");
            }
        }
    }

    // ----- Typed access -----

    /// Reads a required string value.
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Reads a string value with a default.
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Reads a required boolean (`1/0`, `true/false`, `yes/no`, `on/off`,
    /// or any integer where non-zero is true).
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let raw = self.get_str(key)?;
        value::parse_bool(raw).ok_or_else(|| self.invalid(key, raw, "a boolean"))
    }

    /// Reads a boolean with a default for a missing key.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => value::parse_bool(raw).ok_or_else(|| self.invalid(key, raw, "a boolean")),
        }
    }

    /// Reads a required integer (optional sign, `0x`/`0b` prefixes, `_`
    /// separators).
    pub fn get_i64(&self, key: &str) -> Result<i64, ConfigError> {
        let raw = self.get_str(key)?;
        value::parse_i64(raw).ok_or_else(|| self.invalid(key, raw, "an integer"))
    }

    /// Reads an integer with a default for a missing key.
    pub fn get_i64_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => value::parse_i64(raw).ok_or_else(|| self.invalid(key, raw, "an integer")),
        }
    }

    /// Reads a required float, honouring `k m g t` and `Ki Mi Gi Ti` unit
    /// suffixes.
    pub fn get_f64(&self, key: &str) -> Result<f64, ConfigError> {
        let raw = self.get_str(key)?;
        value::parse_f64(raw).ok_or_else(|| self.invalid(key, raw, "a number"))
    }

    /// Reads a float with a default for a missing key.
    pub fn get_f64_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => value::parse_f64(raw).ok_or_else(|| self.invalid(key, raw, "a number")),
        }
    }

    fn invalid(&self, key: &str, raw: &str, expected: &'static str) -> ConfigError {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            expected,
        }
    }

    // ----- Expansion and serialization -----

    /// Expands `${KEY}` references in `input`.
    ///
    /// Resolution order: this map (canonical key), then the process
    /// environment (verbatim name), then the empty string. Expansion is
    /// recursive up to [`MAX_EXPAND_DEPTH`]; cycles are cut silently.
    pub fn expand(&self, input: &str) -> String {
        expand::expand(self, input, MAX_EXPAND_DEPTH)
    }

    /// Serializes the map as sorted INI text; see the module docs of
    /// `serialize` for the quoting rules.
    pub fn to_ini_string(&self) -> String {
        serialize::to_ini_string(self)
    }
}
