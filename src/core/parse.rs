//! Committed-line parsing.
//!
//! A committed input line has the shape `<destination> <message...>`.
//! The destination accepts hex, octal, binary or decimal literals
//! (`0x2a`, `0o52`, `0b101010`, `42`); the message is the remaining
//! words joined by single spaces and may be empty.

use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The committed line had no destination field.
    Empty,
    /// The destination field is not an integer literal.
    BadDestination(String),
    /// The destination parsed but does not fit a bus address.
    OutOfRange(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty input line"),
            ParseError::BadDestination(s) => write!(f, "not a destination address: {s:?}"),
            ParseError::OutOfRange(s) => write!(f, "destination out of range: {s}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Splits a committed line into `(destination, message)`.
pub fn parse_command(line: &str) -> Result<(u8, String), ParseError> {
    let mut words = line.split_whitespace();
    let destination = parse_int_literal(words.next().ok_or(ParseError::Empty)?)?;
    let message = words.collect::<Vec<_>>().join(" ");
    Ok((destination, message))
}

/// Base-flexible integer literal: `0x`/`0o`/`0b` prefix or plain decimal.
fn parse_int_literal(s: &str) -> Result<u8, ParseError> {
    let (digits, radix) = match s.get(..2) {
        Some("0x" | "0X") => (&s[2..], 16),
        Some("0o" | "0O") => (&s[2..], 8),
        Some("0b" | "0B") => (&s[2..], 2),
        _ => (s, 10),
    };
    match u32::from_str_radix(digits, radix) {
        Ok(n) if n <= u32::from(u8::MAX) => Ok(n as u8),
        Ok(_) => Err(ParseError::OutOfRange(s.to_string())),
        Err(_) => Err(ParseError::BadDestination(s.to_string())),
    }
}
