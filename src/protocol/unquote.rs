//! Quoted and backslash-escaped text literals.
//!
//! ClickHouse escapes `\t`, `\n` and `\\` (among others) in TSV text, and wraps string
//! literals in single quotes inside composite values such as arrays.

use crate::error::{Error, Result};
use simdutf8::basic::from_utf8;

fn is_quote(byte: u8) -> bool {
    matches!(byte, b'\'' | b'"' | b'`')
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode one escape sequence. `input` starts right after the backslash.
///
/// Returns the decoded byte and the number of input bytes consumed.
fn read_escape(input: &[u8]) -> Result<(u8, usize)> {
    let Some(&byte) = input.first() else {
        return Err(Error::InvalidLiteral(
            "dangling backslash at end of input".to_string(),
        ));
    };
    let decoded = match byte {
        b'b' => 0x08,
        b'f' => 0x0c,
        b'r' => b'\r',
        b'n' => b'\n',
        b't' => b'\t',
        b'0' => 0x00,
        b'a' => 0x07,
        b'v' => 0x0b,
        b'x' => {
            let hi = input.get(1).copied().and_then(hex_digit);
            let lo = input.get(2).copied().and_then(hex_digit);
            return match (hi, lo) {
                (Some(hi), Some(lo)) => Ok(((hi << 4) | lo, 3)),
                _ => Err(Error::InvalidLiteral(
                    "invalid \\x escape sequence".to_string(),
                )),
            };
        }
        other => other,
    };
    Ok((decoded, 1))
}

/// Unescape the whole of `input`, appending the bytes to `out`
pub fn unescape_into(input: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let mut rest = input;
    while let Some(pos) = memchr::memchr(b'\\', rest) {
        out.extend_from_slice(&rest[..pos]);
        let (byte, used) = read_escape(&rest[pos + 1..])?;
        out.push(byte);
        rest = &rest[pos + 1 + used..];
    }
    out.extend_from_slice(rest);
    Ok(())
}

/// Read a literal enclosed in `input[0]`, which must be a quote character.
///
/// Appends the unescaped content to `out` and returns the input after the closing quote.
pub fn read_quoted_into<'a>(input: &'a [u8], out: &mut Vec<u8>) -> Result<&'a [u8]> {
    let quote = match input.first() {
        Some(&q) if is_quote(q) => q,
        _ => {
            return Err(Error::InvalidLiteral(format!(
                "expected a quoted literal, got '{}'",
                String::from_utf8_lossy(input)
            )));
        }
    };

    let mut rest = &input[1..];
    loop {
        let Some(pos) = memchr::memchr2(b'\\', quote, rest) else {
            return Err(Error::InvalidLiteral(format!(
                "unterminated quoted literal '{}'",
                String::from_utf8_lossy(input)
            )));
        };
        out.extend_from_slice(&rest[..pos]);
        if rest[pos] == quote {
            return Ok(&rest[pos + 1..]);
        }
        let (byte, used) = read_escape(&rest[pos + 1..])?;
        out.push(byte);
        rest = &rest[pos + 1 + used..];
    }
}

/// Decode a literal that may be quoted or only backslash-escaped.
///
/// A quoted literal must make up the whole input.
pub fn read_unquoted(input: &[u8]) -> Result<String> {
    let mut out = Vec::with_capacity(input.len());
    match input.first() {
        Some(&q) if is_quote(q) => {
            let rest = read_quoted_into(input, &mut out)?;
            if !rest.is_empty() {
                return Err(Error::InvalidLiteral(format!(
                    "unexpected data after quoted literal '{}'",
                    String::from_utf8_lossy(input)
                )));
            }
        }
        _ => unescape_into(input, &mut out)?,
    }
    into_string(out)
}

/// Convert decoded bytes into a `String`, validating UTF-8 with simdutf8
pub fn into_string(bytes: Vec<u8>) -> Result<String> {
    Ok(from_utf8(&bytes)?.to_owned())
}
