use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

/// `Nullable(T)`: `\N` at top level, `NULL` inside composite values
#[derive(Debug)]
pub struct NullableDecoder {
    inner: Box<dyn Decoder>,
    quoted: bool,
}

impl NullableDecoder {
    pub fn new(inner: Box<dyn Decoder>, quoted: bool) -> Self {
        Self { inner, quoted }
    }
}

impl Decoder for NullableDecoder {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let marker: &[u8] = if self.quoted { b"NULL" } else { b"\\N" };
        match input.strip_prefix(marker) {
            Some(rest) => Ok((Value::Null, rest)),
            None => self.inner.decode(input),
        }
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Nullable(Box::new(self.inner.kind()))
    }
}

/// `Array(T)`: `[e1,e2,...]` with elements in their quoted form
#[derive(Debug)]
pub struct ArrayDecoder {
    inner: Box<dyn Decoder>,
}

impl ArrayDecoder {
    pub fn new(inner: Box<dyn Decoder>) -> Self {
        Self { inner }
    }
}

impl Decoder for ArrayDecoder {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let Some(mut rest) = input.strip_prefix(b"[") else {
            return Err(Error::parse("Array", input));
        };
        let mut items = Vec::new();
        if let Some(after) = rest.strip_prefix(b"]") {
            return Ok((Value::Array(items), after));
        }
        loop {
            let (item, after) = self.inner.decode(rest)?;
            items.push(item);
            match after.split_first() {
                Some((b',', tail)) => rest = tail,
                Some((b']', tail)) => return Ok((Value::Array(items), tail)),
                _ => return Err(Error::parse("Array", input)),
            }
        }
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Array(Box::new(self.inner.kind()))
    }
}

/// `Nothing` has no values; it only appears as `Nullable(Nothing)`
#[derive(Debug)]
pub struct NothingDecoder;

impl Decoder for NothingDecoder {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        Err(Error::parse("Nothing", input))
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Null
    }
}
