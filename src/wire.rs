#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Wire grammar of the command protocol.
//!
//! Request direction: `[token]command [arg]*`, newline-terminated, arguments
//! whitespace-separated and optionally double-quoted with C-string escapes.
//! Result direction: `[token]^class(,field=value)*` where values are
//! C-string literals, `[...]` lists, or `{...}` tuples.
//!
//! Everything here is pure string-to-value conversion; no I/O.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

use crate::error::{MicmdError, Result};
use crate::record::{ResultClass, ResultFields, ResultRecord};

/// A parsed request line: optional numeric token, command name, argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub token: Option<u64>,
    pub command: String,
    pub args: Vec<String>,
}

/// Best-effort extraction of the leading numeric token.
///
/// Used so that even a line that later fails to parse still gets its token
/// echoed on the `^error` record.
#[must_use]
pub fn peek_token(line: &str) -> Option<u64> {
    let digits: String = line
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Splits a request line into token, command and arguments.
///
/// # Errors
/// Returns `MalformedRequest` on an empty line, an ill-formed command word,
/// an unterminated quote, or an unsupported escape sequence. No handler runs
/// when this fails.
pub fn parse_request(line: &str) -> Result<Request> {
    let mut chars = line.trim().chars().peekable();
    let token = lex_token(&mut chars)?;
    let command = lex_word(&mut chars);
    if command.is_empty() {
        return Err(malformed("missing command name"));
    }
    match chars.peek() {
        None => {}
        Some(c) if c.is_whitespace() => {}
        Some(c) => {
            return Err(malformed(&format!(
                "unexpected character '{c}' after command name"
            )))
        }
    }
    let args = lex_args(&mut chars)?;
    Ok(Request {
        token,
        command,
        args,
    })
}

/// Renders a result record as one protocol line (without the newline).
#[must_use]
pub fn render_record(record: &ResultRecord) -> String {
    let mut out = String::new();
    if let Some(token) = record.token {
        out.push_str(&token.to_string());
    }
    out.push('^');
    out.push_str(record.class.as_str());
    for (name, value) in &record.fields {
        out.push(',');
        out.push_str(name);
        out.push('=');
        push_value(&mut out, value);
    }
    out
}

/// Parses a result-record line back into its semantic form.
///
/// This is the inverse of [`render_record`]; embedders looping a record back
/// (and the round-trip tests) rely on it.
///
/// # Errors
/// Returns `MalformedRequest` when the line is not a well-formed result
/// record.
pub fn parse_result_record(line: &str) -> Result<ResultRecord> {
    let mut chars = line.trim().chars().peekable();
    let token = lex_token(&mut chars)?;
    if chars.next() != Some('^') {
        return Err(malformed("expected '^' result-record marker"));
    }
    let class_word = lex_word(&mut chars);
    let class = match class_word.as_str() {
        "done" => ResultClass::Done,
        "error" => ResultClass::Error,
        other => return Err(malformed(&format!("unknown result class '{other}'"))),
    };
    let mut fields = ResultFields::new();
    loop {
        match chars.next() {
            None => break,
            Some(',') => {
                let name = lex_word(&mut chars);
                if name.is_empty() {
                    return Err(malformed("missing field name in result record"));
                }
                if chars.next() != Some('=') {
                    return Err(malformed("expected '=' after field name"));
                }
                let value = lex_value(&mut chars)?;
                fields.insert(name, value);
            }
            Some(c) => {
                return Err(malformed(&format!(
                    "unexpected character '{c}' in result record"
                )))
            }
        }
    }
    Ok(ResultRecord {
        token,
        class,
        fields,
    })
}

fn malformed(reason: &str) -> MicmdError {
    MicmdError::MalformedRequest {
        reason: reason.to_string(),
    }
}

fn lex_token(chars: &mut Peekable<Chars>) -> Result<Option<u64>> {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|_| malformed("request token out of range"))
}

fn lex_word(chars: &mut Peekable<Chars>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

fn lex_args(chars: &mut Peekable<Chars>) -> Result<Vec<String>> {
    let mut args = Vec::new();
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            None => return Ok(args),
            Some('"') => {
                chars.next();
                args.push(lex_cstring(chars)?);
            }
            Some(_) => args.push(lex_bare_arg(chars)?),
        }
    }
}

fn lex_bare_arg(chars: &mut Peekable<Chars>) -> Result<String> {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        if c == '"' {
            return Err(malformed("unexpected quote inside unquoted argument"));
        }
        out.push(c);
        chars.next();
    }
    Ok(out)
}

// Opening quote already consumed.
fn lex_cstring(chars: &mut Peekable<Chars>) -> Result<String> {
    let mut out = String::new();
    loop {
        match chars.next() {
            None => return Err(malformed("unterminated quoted string")),
            Some('"') => return Ok(out),
            Some('\\') => out.push(lex_escape(chars)?),
            Some(c) => out.push(c),
        }
    }
}

fn lex_escape(chars: &mut Peekable<Chars>) -> Result<char> {
    match chars.next() {
        None => Err(malformed("trailing backslash in quoted string")),
        Some('a') => Ok('\x07'),
        Some('b') => Ok('\x08'),
        Some('f') => Ok('\x0c'),
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('v') => Ok('\x0b'),
        Some('\\') => Ok('\\'),
        Some('\'') => Ok('\''),
        Some('"') => Ok('"'),
        Some('?') => Ok('\x3f'),
        Some('x') => lex_hex_byte(chars),
        Some('u') => lex_unicode(chars, 4),
        Some('U') => lex_unicode(chars, 8),
        Some(d) if d.is_digit(8) => lex_octal(chars, d),
        Some(other) => Err(malformed(&format!("unsupported escape sequence \\{other}"))),
    }
}

fn lex_octal(chars: &mut Peekable<Chars>, first: char) -> Result<char> {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        let Some(digit) = chars.peek().and_then(|c| c.to_digit(8)) else {
            break;
        };
        value = value * 8 + digit;
        chars.next();
    }
    u8::try_from(value)
        .map(char::from)
        .map_err(|_| malformed("octal escape out of range"))
}

fn lex_hex_byte(chars: &mut Peekable<Chars>) -> Result<char> {
    let mut value: u32 = 0;
    for _ in 0..2 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| malformed("invalid hex escape"))?;
        value = value * 16 + digit;
    }
    u8::try_from(value)
        .map(char::from)
        .map_err(|_| malformed("hex escape out of range"))
}

fn lex_unicode(chars: &mut Peekable<Chars>, digits: u32) -> Result<char> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| malformed("invalid unicode escape"))?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| malformed("unicode escape is not a valid code point"))
}

fn lex_value(chars: &mut Peekable<Chars>) -> Result<Value> {
    match chars.peek() {
        Some('"') => {
            chars.next();
            Ok(Value::String(lex_cstring(chars)?))
        }
        Some('[') => {
            chars.next();
            lex_list(chars)
        }
        Some('{') => {
            chars.next();
            lex_tuple(chars)
        }
        _ => Err(malformed("expected a value")),
    }
}

fn lex_list(chars: &mut Peekable<Chars>) -> Result<Value> {
    let mut items = Vec::new();
    if chars.peek() == Some(&']') {
        chars.next();
        return Ok(Value::Array(items));
    }
    loop {
        items.push(lex_value(chars)?);
        match chars.next() {
            Some(',') => {}
            Some(']') => return Ok(Value::Array(items)),
            _ => return Err(malformed("unterminated list value")),
        }
    }
}

fn lex_tuple(chars: &mut Peekable<Chars>) -> Result<Value> {
    let mut fields = ResultFields::new();
    if chars.peek() == Some(&'}') {
        chars.next();
        return Ok(Value::Object(fields));
    }
    loop {
        let name = lex_word(chars);
        if name.is_empty() {
            return Err(malformed("missing field name in tuple value"));
        }
        if chars.next() != Some('=') {
            return Err(malformed("expected '=' in tuple value"));
        }
        let value = lex_value(chars)?;
        fields.insert(name, value);
        match chars.next() {
            Some(',') => {}
            Some('}') => return Ok(Value::Object(fields)),
            _ => return Err(malformed("unterminated tuple value")),
        }
    }
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        // Absent ambient state marshals as the empty string, never as a hole.
        Value::Null => out.push_str("\"\""),
        Value::Bool(b) => push_cstring(out, if *b { "true" } else { "false" }),
        Value::Number(n) => push_cstring(out, &n.to_string()),
        Value::String(s) => push_cstring(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_value(out, item);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            for (i, (name, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(name);
                out.push('=');
                push_value(out, item);
            }
            out.push('}');
        }
    }
}

fn push_cstring(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\x7f' => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
