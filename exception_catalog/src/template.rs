//! `${name}` placeholder substitution
//!
//! Rules:
//! - `${name}` is replaced by the bound value
//! - `${name:-fallback}` renders `fallback` when `name` is unbound
//! - `$${name}` renders the literal text `${name}`
//! - unbound placeholders without a fallback are left as written
//! - a `${` with no closing `}` is copied through unchanged
//!
//! Substitution is a single pass; substituted values are never re-scanned.

use crate::context::Variables;

const PREFIX: &str = "${";
const ESCAPED_PREFIX: &str = "$${";
const SUFFIX: char = '}';
const DEFAULT_DELIMITER: &str = ":-";

/// Render `pattern` against `vars`
pub fn substitute(pattern: &str, vars: &Variables) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let tail = &rest[dollar..];

        if tail.starts_with(ESCAPED_PREFIX) {
            out.push_str(PREFIX);
            rest = &tail[ESCAPED_PREFIX.len()..];
        } else if let Some(body) = tail.strip_prefix(PREFIX) {
            let Some(end) = body.find(SUFFIX) else {
                out.push_str(tail);
                return out;
            };
            let placeholder = &tail[..PREFIX.len() + end + 1];
            match lookup(&body[..end], vars) {
                Some(value) => out.push_str(value),
                None => out.push_str(placeholder),
            }
            rest = &tail[placeholder.len()..];
        } else {
            out.push('$');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(expression: &'a str, vars: &'a Variables) -> Option<&'a str> {
    match expression.split_once(DEFAULT_DELIMITER) {
        Some((name, fallback)) => Some(vars.get(name).map(String::as_str).unwrap_or(fallback)),
        None => vars.get(expression).map(String::as_str),
    }
}

/// Placeholder names referenced by `pattern`, in order of appearance
pub fn placeholders(pattern: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = pattern;

    while let Some(dollar) = rest.find('$') {
        let tail = &rest[dollar..];
        if tail.starts_with(ESCAPED_PREFIX) {
            rest = &tail[ESCAPED_PREFIX.len()..];
        } else if let Some(body) = tail.strip_prefix(PREFIX) {
            let Some(end) = body.find(SUFFIX) else {
                break;
            };
            let expression = &body[..end];
            let name = expression
                .split_once(DEFAULT_DELIMITER)
                .map_or(expression, |(name, _)| name);
            names.push(name);
            rest = &body[end + 1..];
        } else {
            rest = &tail[1..];
        }
    }

    names
}
