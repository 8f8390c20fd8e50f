//! INI serialization.
//!
//! Keys are emitted in lexicographic order: sectionless entries first, then
//! one `[section]` block per dotted prefix. Values containing whitespace or
//! comment markers are quoted and escaped so the output reloads to the same
//! map.

use crate::Config;

pub(crate) fn to_ini_string(config: &Config) -> String {
    let mut keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
    keys.sort_unstable();

    let mut out = String::new();
    let mut current_section: Option<&str> = None;

    // Sectionless keys sort wherever '.' falls; emit them in a first pass so
    // they cannot land under a heading.
    for &key in keys.iter().filter(|k| !k.contains('.')) {
        if let Some(value) = config.get(key) {
            push_entry(&mut out, key, value);
        }
    }

    for &key in keys.iter().filter(|k| k.contains('.')) {
        let (section, leaf) = match key.split_once('.') {
            Some(parts) => parts,
            None => continue,
        };
        if current_section != Some(section) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push('[');
            out.push_str(section);
            out.push_str("]\n");
            current_section = Some(section);
        }
        if let Some(value) = config.get(key) {
            push_entry(&mut out, leaf, value);
        }
    }
    out
}

fn push_entry(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(" = ");
    if needs_quoting(value) {
        out.push('"');
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out.push('"');
    } else {
        out.push_str(value);
    }
    out.push('\n');
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '#' || c == ';')
        || value.starts_with(['"', '\''])
}
