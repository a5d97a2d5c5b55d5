//! Positional message formatting.
//!
//! `{0}`, `{1}`, ... are replaced by the argument at that index. A format
//! suffix such as `{0,number}` is accepted and ignored; the argument is
//! rendered with its `Display` impl. A single quote starts a literal run up
//! to the next single quote and `''` yields one quote. Placeholders with no
//! matching argument, and malformed ones, are copied through unchanged.

use std::fmt;

/// Substitute positional arguments into `pattern`.
///
/// ```rust
/// use resource_enum::format_message;
///
/// let text = format_message("{1} and {0}", &[&"first", &2]);
/// assert_eq!(text, "2 and first");
/// ```
pub fn format_message(pattern: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\'' => quoted = !quoted,
            _ if quoted => out.push(c),
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    body.push(inner);
                }

                let argument = body
                    .split(',')
                    .next()
                    .and_then(|index| index.trim().parse::<usize>().ok())
                    .and_then(|index| args.get(index));

                match (closed, argument) {
                    (true, Some(arg)) => out.push_str(&arg.to_string()),
                    (true, None) => {
                        out.push('{');
                        out.push_str(&body);
                        out.push('}');
                    }
                    (false, _) => {
                        out.push('{');
                        out.push_str(&body);
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}
