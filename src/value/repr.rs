//! Literal representations for scalar values.
//!
//! These follow the conventions test authors read in parametrized ids:
//! single-quoted text, `b'...'` byte strings and shortest round-trip floats
//! with two-digit exponents.

/// Quoted, escaped text literal.
///
/// # Examples
///
/// ```rust
/// use prettifier::value::repr::str_literal;
/// assert_eq!(str_literal("str"), "'str'");
/// assert_eq!(str_literal("it's"), "\"it's\"");
/// assert_eq!(str_literal("a\nb"), "'a\\nb'");
/// ```
pub fn str_literal(text: &str) -> String {
    let quote = pick_quote(text.contains('\''), text.contains('"'));
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xff {
                    out.push_str(&format!("\\x{code:02x}"));
                } else if code <= 0xffff {
                    out.push_str(&format!("\\u{code:04x}"));
                } else {
                    out.push_str(&format!("\\U{code:08x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Byte-string literal with the `b` marker; non-printable bytes as `\xNN`.
pub fn bytes_literal(bytes: &[u8]) -> String {
    let quote = pick_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(b as char),
            b => out.push_str(&format!("\\x{b:02x}")),
        }
    }
    out.push(quote);
    out
}

/// Shortest float literal that reads back to the same value.
///
/// # Examples
///
/// ```rust
/// use prettifier::value::repr::float_literal;
/// assert_eq!(float_literal(61.0), "61.0");
/// assert_eq!(float_literal(1e-5), "1e-05");
/// assert_eq!(float_literal(1.5e16), "1.5e+16");
/// ```
pub fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug already switches to scientific notation at the same thresholds
    // (below 1e-4 or from 1e16); only the exponent spelling differs.
    let debug = format!("{value:?}");
    match debug.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => debug,
    }
}

fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_switch_only_when_needed() {
        assert_eq!(str_literal(""), "''");
        assert_eq!(str_literal("both ' and \""), "'both \\' and \"'");
        assert_eq!(str_literal("back\\slash"), "'back\\\\slash'");
        assert_eq!(str_literal("\u{7}"), "'\\x07'");
    }

    #[test]
    fn bytes_escape_non_printable() {
        assert_eq!(bytes_literal(b"bytes"), "b'bytes'");
        assert_eq!(bytes_literal(&[0, 0xff, b'a']), "b'\\x00\\xffa'");
    }

    #[test]
    fn floats_keep_trailing_zero_and_pad_exponent() {
        assert_eq!(float_literal(1.0), "1.0");
        assert_eq!(float_literal(-0.5), "-0.5");
        assert_eq!(float_literal(1e16), "1e+16");
        assert_eq!(float_literal(0.0001), "0.0001");
        assert_eq!(float_literal(1.25e-7), "1.25e-07");
        assert_eq!(float_literal(f64::NEG_INFINITY), "-inf");
        assert_eq!(float_literal(f64::NAN), "nan");
    }
}
