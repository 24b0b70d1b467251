//! Per-column value decoders for the TabSeparated text format.
//!
//! A [`Decoder`] reads one value from the front of a field and hands back the unconsumed
//! input, so the caller can tell a clean decode from one that left trailing bytes.
//! [`new_decoder`] is the factory that maps a parsed type descriptor to a decoder.

mod composite;
mod number;
mod temporal;
mod text;

use std::fmt;

use crate::error::{Error, Result};
use crate::protocol::TypeDesc;
use crate::value::{Value, ValueKind};

pub use composite::{ArrayDecoder, NothingDecoder, NullableDecoder};
pub use number::{FloatDecoder, IntDecoder};
pub use temporal::{DateDecoder, DateTimeDecoder, Zone, resolve_zone};
pub use text::{DecimalDecoder, StringDecoder};

/// Type-specific capability that turns a field's text into a [`Value`]
pub trait Decoder: fmt::Debug + Send + Sync {
    /// Decode one value from the start of `input`.
    ///
    /// Returns the value and the input that was not consumed.
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])>;

    /// The kind of value this decoder produces
    fn kind(&self) -> ValueKind;
}

/// Options that affect how values are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Time zone for temporal values
    pub location: Zone,
    /// Use the zone declared by the column type (e.g. `DateTime('UTC')`) instead of `location`
    pub use_db_location: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            location: Zone::UTC,
            use_db_location: false,
        }
    }
}

/// Build the decoder for a top-level column of type `desc`
pub fn new_decoder(desc: &TypeDesc, opts: &DecoderOptions) -> Result<Box<dyn Decoder>> {
    build(desc, opts, false)
}

/// `quoted` is set for values nested in composite types, where strings and dates are
/// written in single quotes and NULL is spelled `NULL`.
fn build(desc: &TypeDesc, opts: &DecoderOptions, quoted: bool) -> Result<Box<dyn Decoder>> {
    let decoder: Box<dyn Decoder> = match desc.name.as_str() {
        "Int8" => Box::new(IntDecoder::<i8>::new()),
        "Int16" => Box::new(IntDecoder::<i16>::new()),
        "Int32" => Box::new(IntDecoder::<i32>::new()),
        "Int64" => Box::new(IntDecoder::<i64>::new()),
        "UInt8" => Box::new(IntDecoder::<u8>::new()),
        "UInt16" => Box::new(IntDecoder::<u16>::new()),
        "UInt32" => Box::new(IntDecoder::<u32>::new()),
        "UInt64" => Box::new(IntDecoder::<u64>::new()),
        "Float32" => Box::new(FloatDecoder::<f32>::new()),
        "Float64" => Box::new(FloatDecoder::<f64>::new()),

        "String" | "UUID" | "IPv4" | "IPv6" | "Enum8" | "Enum16" => {
            Box::new(StringDecoder::new(quoted))
        }
        "FixedString" => {
            let [len] = desc.args.as_slice() else {
                return Err(bad_args(desc, "expected a length"));
            };
            if len.name.parse::<usize>().is_err() {
                return Err(bad_args(desc, "length is not a number"));
            }
            Box::new(StringDecoder::new(quoted))
        }
        "Decimal" | "Decimal32" | "Decimal64" | "Decimal128" | "Decimal256" => {
            Box::new(DecimalDecoder)
        }

        "Date" | "Date32" => Box::new(DateDecoder::new(quoted)),
        "DateTime" => {
            let zone = column_location(desc.args.first(), opts)?;
            Box::new(DateTimeDecoder::new(zone, 0, quoted))
        }
        "DateTime64" => {
            let precision = desc
                .args
                .first()
                .and_then(|p| p.name.parse::<u8>().ok())
                .filter(|p| *p <= 9)
                .ok_or_else(|| bad_args(desc, "expected a precision between 0 and 9"))?;
            let zone = column_location(desc.args.get(1), opts)?;
            Box::new(DateTimeDecoder::new(zone, precision, quoted))
        }

        "Nullable" => {
            let inner = build(single_arg(desc)?, opts, quoted)?;
            Box::new(NullableDecoder::new(inner, quoted))
        }
        "Array" => {
            let inner = build(single_arg(desc)?, opts, true)?;
            Box::new(ArrayDecoder::new(inner))
        }
        "LowCardinality" => return build(single_arg(desc)?, opts, quoted),
        "SimpleAggregateFunction" => {
            let [_, inner] = desc.args.as_slice() else {
                return Err(bad_args(desc, "expected a function and a type"));
            };
            return build(inner, opts, quoted);
        }
        "Nothing" => Box::new(NothingDecoder),

        _ => return Err(Error::UnsupportedType(desc.to_string())),
    };
    Ok(decoder)
}

fn single_arg(desc: &TypeDesc) -> Result<&TypeDesc> {
    match desc.args.as_slice() {
        [arg] => Ok(arg),
        _ => Err(bad_args(desc, "expected exactly one type argument")),
    }
}

fn bad_args(desc: &TypeDesc, reason: &str) -> Error {
    Error::InvalidTypeDesc {
        desc: desc.to_string(),
        reason: reason.to_string(),
    }
}

/// The zone declared by the column wins only when `use_db_location` is set
fn column_location(zone: Option<&TypeDesc>, opts: &DecoderOptions) -> Result<Zone> {
    match zone {
        Some(zone) if opts.use_db_location => resolve_zone(&zone.name),
        _ => Ok(opts.location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::{datetime, offset};

    fn decoder(ty: &str, opts: &DecoderOptions) -> Box<dyn Decoder> {
        new_decoder(&ty.parse().unwrap(), opts).unwrap()
    }

    fn decode_all(ty: &str, input: &[u8]) -> Value {
        let (value, rest) = decoder(ty, &DecoderOptions::default())
            .decode(input)
            .unwrap();
        assert!(rest.is_empty(), "{ty}: unconsumed {rest:?}");
        value
    }

    #[test]
    fn test_kinds() {
        let opts = DecoderOptions::default();
        assert_eq!(decoder("UInt16", &opts).kind(), ValueKind::UInt16);
        assert_eq!(decoder("LowCardinality(String)", &opts).kind(), ValueKind::String);
        assert_eq!(
            decoder("Array(Nullable(Float64))", &opts).kind(),
            ValueKind::Array(Box::new(ValueKind::Nullable(Box::new(ValueKind::Float64))))
        );
        assert_eq!(
            decoder("SimpleAggregateFunction(sum, UInt64)", &opts).kind(),
            ValueKind::UInt64
        );
        assert_eq!(decoder("Nullable(Nothing)", &opts).kind(), ValueKind::Nullable(Box::new(ValueKind::Null)));
    }

    #[test]
    fn test_unsupported_types() {
        let opts = DecoderOptions::default();
        for ty in ["Foo", "Int128", "Tuple(Int8, String)", "Map(String, UInt8)"] {
            assert!(
                matches!(
                    new_decoder(&ty.parse().unwrap(), &opts),
                    Err(Error::UnsupportedType(_))
                ),
                "{ty}"
            );
        }
    }

    #[test]
    fn test_bad_arguments() {
        let opts = DecoderOptions::default();
        for ty in ["Nullable", "Array(Int8, Int8)", "FixedString(x)", "DateTime64(12)", "DateTime64"] {
            assert!(
                matches!(
                    new_decoder(&ty.parse().unwrap(), &opts),
                    Err(Error::InvalidTypeDesc { .. })
                ),
                "{ty}"
            );
        }
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(decode_all("Int32", b"-17"), Value::Int32(-17));
        assert_eq!(decode_all("Float64", b"1.5e3"), Value::Float64(1500.0));
        assert_eq!(decode_all("String", b"a\\tb"), Value::String("a\tb".to_string()));
        assert_eq!(decode_all("FixedString(3)", b"abc"), Value::String("abc".to_string()));
        assert_eq!(
            decode_all("Enum8('x' = 1, 'y' = 2)", b"y"),
            Value::String("y".to_string())
        );
        assert_eq!(decode_all("Decimal(9, 2)", b"-12.50"), Value::String("-12.50".to_string()));
    }

    #[test]
    fn test_nested_values() {
        assert_eq!(
            decode_all("Array(Nullable(String))", b"['a',NULL,'it\\'s']"),
            Value::Array(vec![
                Value::String("a".to_string()),
                Value::Null,
                Value::String("it's".to_string()),
            ])
        );
        assert_eq!(
            decode_all("Array(Array(UInt8))", b"[[1,2],[]]"),
            Value::Array(vec![
                Value::Array(vec![Value::UInt8(1), Value::UInt8(2)]),
                Value::Array(vec![]),
            ])
        );
        assert_eq!(decode_all("Nullable(Int8)", b"\\N"), Value::Null);
        assert_eq!(decode_all("Nullable(Nothing)", b"\\N"), Value::Null);
    }

    #[test]
    fn test_db_location() {
        let client = DecoderOptions {
            location: offset!(+2).into(),
            use_db_location: false,
        };
        let (value, _) = decoder("DateTime('Etc/GMT-5')", &client)
            .decode(b"2021-03-04 05:06:07")
            .unwrap();
        assert_eq!(value, Value::DateTime(datetime!(2021-03-04 05:06:07 +2)));

        let server = DecoderOptions {
            use_db_location: true,
            ..client
        };
        let (value, _) = decoder("DateTime64(3, 'Etc/GMT-5')", &server)
            .decode(b"2021-03-04 05:06:07.250")
            .unwrap();
        assert_eq!(value, Value::DateTime(datetime!(2021-03-04 05:06:07.25 +5)));

        // no declared zone falls back to the client location
        let (value, _) = decoder("DateTime", &server)
            .decode(b"2021-03-04 05:06:07")
            .unwrap();
        assert_eq!(value, Value::DateTime(datetime!(2021-03-04 05:06:07 +2)));
    }

    #[test]
    fn test_named_db_location() {
        let server = DecoderOptions {
            use_db_location: true,
            ..DecoderOptions::default()
        };
        let d = decoder("DateTime('Europe/Berlin')", &server);
        // CET in winter, CEST in summer
        assert_eq!(
            d.decode(b"2021-01-15 12:00:00").unwrap().0,
            Value::DateTime(datetime!(2021-01-15 12:00:00 +1))
        );
        assert_eq!(
            d.decode(b"2021-07-15 12:00:00").unwrap().0,
            Value::DateTime(datetime!(2021-07-15 12:00:00 +2))
        );
    }

    #[test]
    fn test_unknown_db_location() {
        let opts = DecoderOptions {
            use_db_location: true,
            ..DecoderOptions::default()
        };
        assert!(matches!(
            new_decoder(&"DateTime('Mars/Olympus')".parse().unwrap(), &opts),
            Err(Error::UnsupportedTimeZone(_))
        ));
        // ignored unless the column zone is preferred
        assert!(new_decoder(&"DateTime('Mars/Olympus')".parse().unwrap(), &DecoderOptions::default()).is_ok());
    }
}
