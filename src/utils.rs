/// Shortest text that parses back to the same `f64`.
pub fn format_real(value: f64) -> String {
    let text = format!("{}", value);
    if text.len() > 24 {
        // very large/small magnitudes read better in exponent form
        format!("{:e}", value)
    } else {
        text
    }
}

/// `'c' (0x63)` rendering used by scanner diagnostics.
pub fn describe_symbol(symbol: char) -> String {
    format!("'{}' ({:#04X})", symbol.escape_debug(), u32::from(symbol))
}

/// Quote and escape `s` as a JSON string literal.
pub fn escape_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode the escapes of a JSON string body (without the quotes).
///
/// Unknown escapes keep the escaped character; malformed `\u` sequences
/// are kept verbatim.
pub fn unescape_json_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match decode_unicode_escape(&hex, &mut chars) {
                    Some(c) => out.push(c),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn decode_unicode_escape(
    hex: &str,
    rest: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Option<char> {
    if hex.len() != 4 {
        return None;
    }
    let high = u32::from_str_radix(hex, 16).ok()?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high);
    }

    // high surrogate, a low one must follow as \uXXXX
    let mut lookahead = rest.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return None;
    }
    let low_hex: String = lookahead.by_ref().take(4).collect();
    let low = u32::from_str_radix(&low_hex, 16).ok()?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    *rest = lookahead;
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}
