//! Line-oriented parser for `key=value` property files
//!
//! Works in two passes: natural lines are joined into logical lines
//! (dropping comments and honoring trailing-backslash continuations), then
//! each logical line is split into a key and a value and unescaped.

use super::error::{PropertiesError, PropertiesResult};
use super::Properties;

/// A logical line and the natural line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalLine {
    text: String,
    line: usize,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parse property-file text
pub fn parse_str(input: &str) -> PropertiesResult<Properties> {
    let mut properties = Properties::new();

    for logical in logical_lines(input) {
        let (raw_key, raw_value) = split_key_value(&logical.text);
        let key = unescape(raw_key, logical.line)?;
        let value = unescape(raw_value, logical.line)?;
        properties.insert(key, value);
    }

    Ok(properties)
}

/// Parse raw bytes, rejecting anything that is not UTF-8
pub fn parse_bytes(input: &[u8]) -> PropertiesResult<Properties> {
    let text = std::str::from_utf8(input).map_err(|e| PropertiesError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    parse_str(text.strip_prefix('\u{feff}').unwrap_or(text))
}

// ============================================================================
// LINE ASSEMBLY
// ============================================================================

/// Split on `\n`, `\r\n` and lone `\r`
fn natural_lines(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&input[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&input[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&input[start..]);
    }

    lines
}

/// Remove a continuation backslash; an even run of backslashes is literal
fn strip_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        (&line[..line.len() - 1], true)
    } else {
        (line, false)
    }
}

fn logical_lines(input: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (index, raw) in natural_lines(input).into_iter().enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);

        let mut logical = match pending.take() {
            Some(logical) => logical,
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                LogicalLine {
                    text: String::new(),
                    line: index + 1,
                }
            }
        };

        let (body, continues) = strip_continuation(trimmed);
        logical.text.push_str(body);

        if continues {
            pending = Some(logical);
        } else {
            lines.push(logical);
        }
    }

    if let Some(logical) = pending {
        lines.push(logical);
    }

    lines
}

// ============================================================================
// KEY / VALUE SPLITTING
// ============================================================================

/// Split at the first unescaped `=`, `:` or blank
fn split_key_value(text: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = text.len();
    let mut value_start = text.len();
    let mut explicit_separator = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                explicit_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                value_start = i + c.len_utf8();
                break;
            }
            _ => {}
        }
    }

    let mut value = text[value_start..].trim_start_matches(is_blank);
    if !explicit_separator {
        if let Some(rest) = value.strip_prefix(['=', ':']) {
            value = rest.trim_start_matches(is_blank);
        }
    }

    (&text[..key_end], value)
}

// ============================================================================
// UNESCAPING
// ============================================================================

fn unescape(raw: &str, line: usize) -> PropertiesResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut high_surrogate: Option<u16> = None;

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_surrogate(&mut out, &mut high_surrogate);
            out.push(c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            break;
        };

        if escaped == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            let unit = parse_code_unit(&hex).ok_or_else(|| PropertiesError::MalformedUnicodeEscape {
                line,
                sequence: format!("\\u{}", hex),
            })?;
            push_code_unit(&mut out, &mut high_surrogate, unit);
            continue;
        }

        flush_surrogate(&mut out, &mut high_surrogate);
        out.push(match escaped {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }

    flush_surrogate(&mut out, &mut high_surrogate);
    Ok(out)
}

fn parse_code_unit(hex: &str) -> Option<u16> {
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

/// Decode UTF-16 units, pairing surrogates written as two `\u` escapes
fn push_code_unit(out: &mut String, high_surrogate: &mut Option<u16>, unit: u16) {
    match (high_surrogate.take(), unit) {
        (Some(high), 0xDC00..=0xDFFF) => {
            for decoded in char::decode_utf16([high, unit]) {
                out.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
        (previous, 0xD800..=0xDBFF) => {
            if previous.is_some() {
                out.push(char::REPLACEMENT_CHARACTER);
            }
            *high_surrogate = Some(unit);
        }
        (previous, _) => {
            if previous.is_some() {
                out.push(char::REPLACEMENT_CHARACTER);
            }
            out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    }
}

fn flush_surrogate(out: &mut String, high_surrogate: &mut Option<u16>) {
    if high_surrogate.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}
