//! Small text helpers shared by every generator.

/// JSON-quotes `text` for use in diagnostics.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Splits `full` on any of the characters in `delimiters`. Each character is
/// an independent separator; empty pieces are skipped.
pub fn split_set<'a>(full: &'a str, delimiters: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    full.split(move |c: char| delimiters.contains(c))
        .filter(|piece| !piece.is_empty())
}

/// Replaces the first (or, with `replace_all`, every) occurrence of `old` in
/// `s`. Searching resumes after each replacement, so `new` is never rescanned.
/// An empty `old` leaves `s` unchanged.
pub fn replace(s: &str, old: &str, new: &str, replace_all: bool) -> String {
    if old.is_empty() {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut start = 0;
    while let Some(found) = s[start..].find(old) {
        let pos = start + found;
        result.push_str(&s[start..pos]);
        result.push_str(new);
        start = pos + old.len();
        if !replace_all {
            break;
        }
    }
    result.push_str(&s[start..]);
    result
}

pub fn dots_to_underscores(name: &str) -> String {
    replace(name, ".", "_", true)
}

pub fn to_upper(name: &str) -> String {
    name.to_ascii_uppercase()
}

pub fn to_lower(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// `FooBar` -> `FOO_BAR`. An underscore goes before every uppercase letter
/// that follows a non-uppercase one; never before the first character.
pub fn camel_to_upper(name: &str) -> String {
    let mut rv = String::with_capacity(name.len() + 4);
    let mut was_upper = true;
    for c in name.chars() {
        let is_upper = c.is_ascii_uppercase();
        if is_upper && !was_upper {
            rv.push('_');
        }
        rv.push(c.to_ascii_uppercase());
        was_upper = is_upper;
    }
    rv
}

/// `FooBar` -> `foo_bar`, with the same word boundaries as [`camel_to_upper`].
pub fn camel_to_lower(name: &str) -> String {
    let mut rv = String::with_capacity(name.len() + 4);
    let mut was_upper = true;
    for c in name.chars() {
        let is_upper = c.is_ascii_uppercase();
        if is_upper && !was_upper {
            rv.push('_');
        }
        rv.push(c.to_ascii_lowercase());
        was_upper = is_upper;
    }
    rv
}

/// `foo_bar` -> `FooBar`.
pub fn to_camel(name: &str) -> String {
    let mut rv = String::with_capacity(name.len());
    let mut next_is_upper = true;
    for c in name.chars() {
        if c == '_' {
            next_is_upper = true;
        } else if next_is_upper {
            rv.push(c.to_ascii_uppercase());
            next_is_upper = false;
        } else {
            rv.push(c);
        }
    }
    rv
}

/// A run of spaces as wide as `s`, for lining up continuation lines.
pub fn blankify(s: &str) -> String {
    " ".repeat(s.len())
}

/// Lowercase hex without zero padding.
pub fn hex(i: u8) -> String {
    format!("{:x}", i)
}

/// Turns a file name into a C identifier. Non-alphanumeric bytes become `_`
/// followed by their hex code, so distinct names never collide.
pub fn filename_identifier(filename: &str) -> String {
    let mut result = String::with_capacity(filename.len());
    for b in filename.bytes() {
        if b.is_ascii_alphanumeric() {
            result.push(b as char);
        } else {
            result.push('_');
            result.push_str(&hex(b));
        }
    }
    result
}

pub fn strip_proto(filename: &str) -> &str {
    filename
        .strip_suffix(".protodevel")
        .or_else(|| filename.strip_suffix(".proto"))
        .unwrap_or(filename)
}

/// C literal text for a `float` default (`%.6g`).
pub fn simple_ftoa(f: f32) -> String {
    format_g(f as f64, 6)
}

/// C literal text for a `double` default (`%.15g`).
pub fn simple_dtoa(d: f64) -> String {
    format_g(d, 15)
}

fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INFINITY" } else { "-INFINITY" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
