//! Value coercions for typed configuration access.

/// Parses a boolean setting.
///
/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` case-insensitively.
/// Anything else falls back to integer parsing, where non-zero is true.
pub fn parse_bool(text: &str) -> Option<bool> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("1")
        || t.eq_ignore_ascii_case("true")
        || t.eq_ignore_ascii_case("yes")
        || t.eq_ignore_ascii_case("on")
    {
        return Some(true);
    }
    if t.eq_ignore_ascii_case("0")
        || t.eq_ignore_ascii_case("false")
        || t.eq_ignore_ascii_case("no")
        || t.eq_ignore_ascii_case("off")
    {
        return Some(false);
    }
    parse_i64(t).map(|v| v != 0)
}

/// Parses a signed 64-bit integer.
///
/// Optional sign, optional `0x`/`0b` base prefix, `_` separators ignored,
/// surrounding whitespace tolerated.
pub fn parse_i64(text: &str) -> Option<i64> {
    let t = text.trim();
    let (negative, rest) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let (base, digits) = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        (2, bin)
    } else {
        (10, rest)
    };

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    // Parse wide so `-0x8000_0000_0000_0000` survives the sign flip.
    let magnitude = i128::from_str_radix(&cleaned, base).ok()?;
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).ok()
}

/// Parses a float with an optional unit suffix.
///
/// Decimal suffixes `k m g t` scale by powers of 10³; binary suffixes
/// `Ki Mi Gi Ti` scale by powers of 1024. Suffixes are matched
/// case-insensitively.
pub fn parse_f64(text: &str) -> Option<f64> {
    let t = text.trim();

    let (number, scale) = if let Some(rest) = strip_suffix_ci(t, "ki") {
        (rest, 1024.0)
    } else if let Some(rest) = strip_suffix_ci(t, "mi") {
        (rest, 1024.0 * 1024.0)
    } else if let Some(rest) = strip_suffix_ci(t, "gi") {
        (rest, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(rest) = strip_suffix_ci(t, "ti") {
        (rest, 1024.0 * 1024.0 * 1024.0 * 1024.0)
    } else if let Some(rest) = strip_suffix_ci(t, "k") {
        (rest, 1e3)
    } else if let Some(rest) = strip_suffix_ci(t, "m") {
        (rest, 1e6)
    } else if let Some(rest) = strip_suffix_ci(t, "g") {
        (rest, 1e9)
    } else if let Some(rest) = strip_suffix_ci(t, "t") {
        (rest, 1e12)
    } else {
        (t, 1.0)
    };

    let number = number.trim_end();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().map(|v| v * scale)
}

fn strip_suffix_ci<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    let (head, tail) = (text.get(..split)?, text.get(split..)?);
    // Require a numeric body so a bare suffix does not parse.
    if tail.eq_ignore_ascii_case(suffix) && head.ends_with(|c: char| c.is_ascii_digit() || c == '.')
    {
        Some(head)
    } else {
        None
    }
}
