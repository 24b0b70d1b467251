use simdutf8::basic::from_utf8;

use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::protocol::unquote::{into_string, read_quoted_into, unescape_into};
use crate::value::{Value, ValueKind};

/// Backslash-escaped text. Inside composite values the text is single-quoted.
#[derive(Debug)]
pub struct StringDecoder {
    quoted: bool,
}

impl StringDecoder {
    pub fn new(quoted: bool) -> Self {
        Self { quoted }
    }
}

impl Decoder for StringDecoder {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let mut out = Vec::with_capacity(input.len());
        let rest = if self.quoted {
            read_quoted_into(input, &mut out)?
        } else {
            unescape_into(input, &mut out)?;
            &input[input.len()..]
        };
        Ok((Value::String(into_string(out)?), rest))
    }

    fn kind(&self) -> ValueKind {
        ValueKind::String
    }
}

/// Decimal numbers are kept in their exact textual form
#[derive(Debug)]
pub struct DecimalDecoder;

impl Decoder for DecimalDecoder {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let sign = usize::from(input.first() == Some(&b'-'));
        let len = input[sign..]
            .iter()
            .take_while(|b| b.is_ascii_digit() || **b == b'.')
            .count();
        if len == 0 {
            return Err(Error::parse("Decimal", input));
        }
        let (text, rest) = input.split_at(sign + len);
        Ok((Value::String(from_utf8(text)?.to_string()), rest))
    }

    fn kind(&self) -> ValueKind {
        ValueKind::String
    }
}
