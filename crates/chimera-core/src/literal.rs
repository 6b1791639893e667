//! Literal text encodings fed into the hash chain
//!
//! Two inputs to SHA-256 are not raw bytes but the *literal* text of a value:
//! the lexicon map (`{'alpha': '8ed3…', 'beta': 'f44e…'}`) and the agent value
//! list (`[0.2973…, 0.3012…]`). Existing manifold trajectories were produced
//! with these exact spellings, so the formatting rules here are load-bearing:
//! a single changed quote or digit yields a different trajectory.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Quote a string the way a dictionary literal spells it.
///
/// Single quotes unless the text contains `'` and no `"`. Backslashes, the
/// chosen quote, `\t`, `\n`, `\r` and non-printable characters are escaped.
pub fn string_literal(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02x}", code));
                } else if code <= 0xFFFF {
                    out.push_str(&format!("\\u{:04x}", code));
                } else {
                    out.push_str(&format!("\\U{:08x}", code));
                }
            }
        }
    }
    out.push(quote);
    out
}

/// Printable in the `str.isprintable` sense: every general category except
/// `Other` and `Separator`, with the plain space allowed.
fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

/// Shortest round-trip spelling of a float, switching to exponent form
/// (`2.3e-05`, `1e+16`) outside `1e-4 <= |x| < 1e16`.
pub fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let mut positional = format!("{}", value);
        if !positional.contains('.') {
            positional.push_str(".0");
        }
        positional
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// `[a, b, c]` with each element spelled by [`float_literal`].
pub fn float_list_literal(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| float_literal(*v)).collect();
    format!("[{}]", items.join(", "))
}

/// `{'k': 'v', ...}` over ordered string pairs.
pub fn string_map_literal<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let items: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{}: {}", string_literal(k), string_literal(v)))
        .collect();
    format!("{{{}}}", items.join(", "))
}
