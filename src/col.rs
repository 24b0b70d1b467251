use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

/// One column of a result set: its name, declared type and bound decoder
#[derive(Debug)]
pub struct Column {
    name: String,
    type_name: String,
    decoder: Box<dyn Decoder>,
}

impl Column {
    pub fn new(name: String, type_name: String, decoder: Box<dyn Decoder>) -> Self {
        Self {
            name,
            type_name,
            decoder,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name as declared by the server, e.g. `Nullable(String)`
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn value_kind(&self) -> ValueKind {
        self.decoder.kind()
    }

    /// Decode a whole field. Input left over by the decoder is an error.
    pub fn decode_field(&self, field: &[u8]) -> Result<Value> {
        let (value, rest) = self.decoder.decode(field)?;
        if !rest.is_empty() {
            return Err(Error::TrailingData);
        }
        Ok(value)
    }
}
