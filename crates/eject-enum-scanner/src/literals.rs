//! Literal decoding: numeric values and cooked string/template text.

/// Numeric value of a numeric literal's source text.
///
/// Handles decimal, exponent, hex, binary, octal, legacy octal and `_`
/// separators. Bigint literals yield `None`.
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    if text.ends_with('n') {
        return None;
    }
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let bytes = cleaned.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'b' | b'B' => Some(2),
            b'o' | b'O' => Some(8),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_radix_digits(&cleaned[2..], radix);
        }
    }
    if bytes.len() > 1 && bytes[0] == b'0' && bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return parse_radix_digits(&cleaned[1..], 8);
    }
    cleaned.parse::<f64>().ok()
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut value = 0f64;
    for ch in digits.chars() {
        let digit = ch.to_digit(radix)?;
        value = value * f64::from(radix) + f64::from(digit);
    }
    Some(value)
}

/// Cooked value of a quoted string literal (quotes included in `raw`).
pub fn decode_string_literal(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let quote = chars.next()?;
    if !matches!(quote, '"' | '\'') || raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    decode_escapes(&raw[1..raw.len() - 1], false)
}

/// Cooked value of one template piece, given the token text of a
/// no-substitution template, head, middle or tail.
pub fn decode_template_text(raw: &str) -> Option<String> {
    let body = raw
        .strip_prefix('`')
        .or_else(|| raw.strip_prefix('}'))?;
    let body = body
        .strip_suffix('`')
        .or_else(|| body.strip_suffix("${"))?;
    decode_escapes(body, true)
}

fn decode_escapes(body: &str, is_template: bool) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut pending_high_surrogate: Option<u32> = None;

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            if pending_high_surrogate.is_some() {
                return None;
            }
            if is_template && ch == '\r' {
                // Template values normalize CRLF and CR to LF.
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            } else {
                out.push(ch);
            }
            continue;
        }

        let escaped = chars.next()?;
        let code_unit = match escaped {
            'n' => Some('\n' as u32),
            'r' => Some('\r' as u32),
            't' => Some('\t' as u32),
            'b' => Some(0x08),
            'f' => Some(0x0C),
            'v' => Some(0x0B),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => Some(0),
            '0'..='7' if !is_template => {
                let mut value = escaped.to_digit(8)?;
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) if value * 8 + digit <= 0xFF => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        _ => break,
                    }
                }
                Some(value)
            }
            'x' => {
                let hi = chars.next()?.to_digit(16)?;
                let lo = chars.next()?.to_digit(16)?;
                Some(hi * 16 + lo)
            }
            'u' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut value: u32 = 0;
                    loop {
                        let c = chars.next()?;
                        if c == '}' {
                            break;
                        }
                        value = value.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
                    }
                    Some(value)
                } else {
                    let mut value = 0;
                    for _ in 0..4 {
                        value = value * 16 + chars.next()?.to_digit(16)?;
                    }
                    Some(value)
                }
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                None
            }
            '\n' | '\u{2028}' | '\u{2029}' => None,
            '1'..='9' => return None,
            other => {
                if pending_high_surrogate.is_some() {
                    return None;
                }
                out.push(other);
                continue;
            }
        };

        // Line continuation contributes nothing.
        let Some(unit) = code_unit else {
            continue;
        };

        if let Some(high) = pending_high_surrogate.take() {
            if !(0xDC00..=0xDFFF).contains(&unit) {
                return None;
            }
            let combined = 0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00);
            out.push(char::from_u32(combined)?);
        } else if (0xD800..=0xDBFF).contains(&unit) {
            pending_high_surrogate = Some(unit);
        } else {
            out.push(char::from_u32(unit)?);
        }
    }

    if pending_high_surrogate.is_some() {
        return None;
    }
    Some(out)
}
