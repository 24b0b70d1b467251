use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use simdutf8::basic::from_utf8;

use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

/// Integer column types
pub trait Integer: FromStr + fmt::Debug + Send + Sync + 'static {
    const KIND: ValueKind;
    const NAME: &'static str;
    const SIGNED: bool;

    fn into_value(self) -> Value;
}

/// Floating point column types
pub trait Float: FromStr + fmt::Debug + Send + Sync + 'static {
    const KIND: ValueKind;
    const NAME: &'static str;

    fn into_value(self) -> Value;
}

macro_rules! impl_integer {
    ($($ty:ty => $variant:ident, $signed:expr;)*) => {
        $(
            impl Integer for $ty {
                const KIND: ValueKind = ValueKind::$variant;
                const NAME: &'static str = stringify!($variant);
                const SIGNED: bool = $signed;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_integer! {
    i8 => Int8, true;
    i16 => Int16, true;
    i32 => Int32, true;
    i64 => Int64, true;
    u8 => UInt8, false;
    u16 => UInt16, false;
    u32 => UInt32, false;
    u64 => UInt64, false;
}

impl Float for f32 {
    const KIND: ValueKind = ValueKind::Float32;
    const NAME: &'static str = "Float32";

    fn into_value(self) -> Value {
        Value::Float32(self)
    }
}

impl Float for f64 {
    const KIND: ValueKind = ValueKind::Float64;
    const NAME: &'static str = "Float64";

    fn into_value(self) -> Value {
        Value::Float64(self)
    }
}

/// Parses an optional `-` followed by decimal digits, stopping at the first other byte
#[derive(Debug)]
pub struct IntDecoder<T>(PhantomData<T>);

impl<T: Integer> IntDecoder<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Integer> Default for IntDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Integer> Decoder for IntDecoder<T> {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let sign = usize::from(T::SIGNED && input.first() == Some(&b'-'));
        let digits = input[sign..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Err(Error::parse(T::NAME, input));
        }
        let (text, rest) = input.split_at(sign + digits);
        match from_utf8(text)?.parse::<T>() {
            Ok(v) => Ok((v.into_value(), rest)),
            // out of range
            Err(_) => Err(Error::parse(T::NAME, input)),
        }
    }

    fn kind(&self) -> ValueKind {
        T::KIND
    }
}

/// Parses decimal or exponent notation, `inf` and `nan`
#[derive(Debug)]
pub struct FloatDecoder<T>(PhantomData<T>);

impl<T: Float> FloatDecoder<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Float> Default for FloatDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn float_len(input: &[u8]) -> usize {
    let sign = usize::from(matches!(input.first(), Some(b'-' | b'+')));
    let body = &input[sign..];
    for word in [&b"inf"[..], b"nan"] {
        if body.len() >= 3 && body[..3].eq_ignore_ascii_case(word) {
            return sign + 3;
        }
    }
    let int = digit_count(body);
    let mut len = int;
    let mut frac = 0;
    if body.get(len) == Some(&b'.') {
        frac = digit_count(&body[len + 1..]);
        len += 1 + frac;
    }
    if int + frac == 0 {
        return 0;
    }
    // exponent only counts when digits follow
    if matches!(body.get(len), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(body.get(len + 1), Some(b'-' | b'+')));
        let exp = digit_count(&body[len + 1 + exp_sign..]);
        if exp > 0 {
            len += 1 + exp_sign + exp;
        }
    }
    sign + len
}

fn digit_count(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl<T: Float> Decoder for FloatDecoder<T> {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let len = float_len(input);
        if len == 0 {
            return Err(Error::parse(T::NAME, input));
        }
        let (text, rest) = input.split_at(len);
        match from_utf8(text)?.parse::<T>() {
            Ok(v) => Ok((v.into_value(), rest)),
            Err(_) => Err(Error::parse(T::NAME, input)),
        }
    }

    fn kind(&self) -> ValueKind {
        T::KIND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_prefix() {
        let d = IntDecoder::<i32>::new();
        let (value, rest) = d.decode(b"42").unwrap();
        assert_eq!(value, Value::Int32(42));
        assert!(rest.is_empty());

        let (value, rest) = d.decode(b"-7abc").unwrap();
        assert_eq!(value, Value::Int32(-7));
        assert_eq!(rest, b"abc");
    }

    #[test]
    fn test_int_errors() {
        let d = IntDecoder::<i8>::new();
        assert!(matches!(d.decode(b""), Err(Error::ParseError { kind: "Int8", .. })));
        assert!(matches!(d.decode(b"-"), Err(Error::ParseError { .. })));
        assert!(matches!(d.decode(b"128"), Err(Error::ParseError { .. })));

        let u = IntDecoder::<u64>::new();
        assert!(matches!(u.decode(b"-1"), Err(Error::ParseError { kind: "UInt64", .. })));
        assert_eq!(
            u.decode(b"18446744073709551615").unwrap().0,
            Value::UInt64(u64::MAX)
        );
    }

    #[test]
    fn test_float() {
        let d = FloatDecoder::<f64>::new();
        assert_eq!(d.decode(b"-0.25").unwrap().0, Value::Float64(-0.25));
        assert_eq!(d.decode(b"1e-3").unwrap().0, Value::Float64(0.001));
        assert_eq!(d.decode(b"-inf").unwrap().0, Value::Float64(f64::NEG_INFINITY));
        assert!(matches!(d.decode(b"nan").unwrap().0, Value::Float64(v) if v.is_nan()));

        let (value, rest) = d.decode(b"2.5x").unwrap();
        assert_eq!(value, Value::Float64(2.5));
        assert_eq!(rest, b"x");

        assert!(matches!(d.decode(b"x"), Err(Error::ParseError { .. })));
        assert!(matches!(d.decode(b"-."), Err(Error::ParseError { .. })));
    }

    #[test]
    fn test_float_stops_at_end_of_number() {
        let d = FloatDecoder::<f64>::new();
        for (input, value, rest) in [
            (&b"1.5-x"[..], 1.5, &b"-x"[..]),
            (&b"2e"[..], 2.0, &b"e"[..]),
            (&b"3e+"[..], 3.0, &b"e+"[..]),
            (&b"1.25e+2+1"[..], 125.0, &b"+1"[..]),
            (&b"-4E-1e"[..], -0.4, &b"e"[..]),
        ] {
            assert_eq!(d.decode(input).unwrap(), (Value::Float64(value), rest), "{input:?}");
        }
    }

    #[test]
    fn test_float32() {
        let d = FloatDecoder::<f32>::new();
        assert_eq!(d.decode(b"0.5").unwrap().0, Value::Float32(0.5));
        assert_eq!(d.kind(), ValueKind::Float32);
    }
}
