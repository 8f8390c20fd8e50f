//! `${KEY}` expansion.
//!
//! References resolve against the configuration map first (by canonical
//! key), then the process environment (by verbatim name), then to the empty
//! string. Replacement text is expanded recursively with a hard depth
//! bound, so cycles terminate with a bounded output instead of looping.

use crate::Config;

/// Maximum substitution depth before a reference is left unexpanded.
pub const MAX_EXPAND_DEPTH: u32 = 128;

pub(crate) fn expand(config: &Config, input: &str, depth: u32) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                let replacement = lookup(config, name);
                if depth == 0 {
                    // Depth exhausted: cut the cycle, keep what we have.
                    out.push_str(&replacement);
                } else {
                    out.push_str(&expand(config, &replacement, depth - 1));
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated reference is literal text.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

fn lookup(config: &Config, name: &str) -> String {
    if let Some(value) = config.get(&name.to_ascii_lowercase()) {
        return value.to_string();
    }
    std::env::var(name).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::Config;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let mut c = Config::new();
        for (k, v) in pairs {
            c.set(*k, *v);
        }
        c
    }

    #[test]
    fn test_expand_from_map() {
        let c = config(&[("db.host", "localhost")]);
        assert_eq!(c.expand("host=${DB.HOST}"), "host=localhost");
        assert_eq!(c.expand("${db.host}"), "localhost");
    }

    #[test]
    fn test_expand_unknown_is_empty() {
        let c = config(&[]);
        assert_eq!(c.expand("x${vitlc_no_such_key_anywhere}y"), "xy");
    }

    #[test]
    fn test_expand_multiple_references() {
        let c = config(&[("a", "1"), ("b", "2")]);
        assert_eq!(c.expand("${a}+${b}=${a}${b}"), "1+2=12");
    }

    #[test]
    fn test_expand_nested_reference() {
        let c = config(&[("inner", "x"), ("outer", "${inner}${inner}")]);
        assert_eq!(c.expand("${outer}"), "xx");
    }

    #[test]
    fn test_expand_unterminated_is_literal() {
        let c = config(&[("a", "1")]);
        assert_eq!(c.expand("${a} and ${unclosed"), "1 and ${unclosed");
    }

    #[test]
    fn test_expand_no_references() {
        let c = config(&[]);
        assert_eq!(c.expand("plain text"), "plain text");
    }

    #[test]
    fn test_expand_cycle_terminates() {
        let c = config(&[("a", "${b}"), ("b", "${a}")]);
        // Must terminate with bounded output; content is cut silently.
        let result = c.expand("${a}");
        assert!(result.len() < 16);
    }

    #[test]
    fn test_expand_self_reference_terminates() {
        let c = config(&[("a", "x${a}")]);
        let result = c.expand("${a}");
        assert!(result.starts_with('x'));
        assert!(result.len() <= 2 * (crate::expand::MAX_EXPAND_DEPTH as usize + 2));
    }

    #[test]
    fn test_expand_from_environment() {
        // PATH exists in any test environment.
        let c = config(&[]);
        let expanded = c.expand("${PATH}");
        assert_eq!(expanded, std::env::var("PATH").unwrap_or_default());
    }

    #[test]
    fn test_map_wins_over_environment() {
        let c = config(&[("path", "from-map")]);
        assert_eq!(c.expand("${PATH}"), "from-map");
    }
}
