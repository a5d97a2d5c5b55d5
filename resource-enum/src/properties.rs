//! `.properties` file parsing.
//!
//! Supports the usual syntax: `#` and `!` comment lines, `=`, `:` or
//! whitespace between key and value, backslash line continuation and
//! `\t \n \r \f \uXXXX` escapes. Input is UTF-8 text.

use std::collections::BTreeMap;

use thiserror::Error;

/// A flat key/value table read from one bundle file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

/// Syntax error in `.properties` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    pub line: usize,
    pub message: String,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse `.properties` text. Later duplicates of a key replace earlier ones.
    pub fn parse(src: &str) -> Result<Self, PropertiesError> {
        let mut props = Self::new();
        let mut lines = src.lines().enumerate();

        while let Some((idx, raw_line)) = lines.next() {
            let line_no = idx + 1;
            let line = raw_line.trim_start();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let mut logical = line.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (raw_key, raw_value) = split_entry(&logical);
            let key = unescape(raw_key).map_err(|message| PropertiesError {
                line: line_no,
                message,
            })?;
            let value = unescape(raw_value).map_err(|message| PropertiesError {
                line: line_no,
                message,
            })?;
            props.insert(key, value);
        }

        Ok(props)
    }
}

/// A line continues when it ends with an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
    }
    (key, rest)
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(n) = it.next() else {
            break;
        };
        match n {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            'u' => {
                let code = hex4(&mut it)?;
                let ch = match code {
                    0xD800..=0xDBFF => {
                        // A high surrogate must be followed by `\u` and a low one.
                        let low = match (it.next(), it.next()) {
                            (Some('\\'), Some('u')) => hex4(&mut it)?,
                            _ => return Err(format!("unpaired surrogate `\\u{code:04X}`")),
                        };
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(format!("unpaired surrogate `\\u{code:04X}`"));
                        }
                        char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))
                    }
                    _ => char::from_u32(code),
                };
                out.push(ch.ok_or_else(|| format!("escape `\\u{code:04X}` is not a scalar value"))?);
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Read the four hex digits of a `\uXXXX` escape.
fn hex4(it: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let hex: String = it.by_ref().take(4).collect();
    u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == 4)
        .ok_or_else(|| format!("malformed \\uXXXX escape `\\u{hex}`"))
}
