use std::fmt;

use time::{Date, OffsetDateTime};

/// A decoded ClickHouse value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// NULL of a `Nullable(T)` column
    #[default]
    Null,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    /// String, FixedString, UUID, Enum, Decimal and IP address columns
    String(String),
    /// Date, Date32
    Date(Date),
    /// DateTime, DateTime64 in the column's time zone
    DateTime(OffsetDateTime),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Signed view of any integer value that fits in `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int8(v) => Some(v.into()),
            Value::Int16(v) => Some(v.into()),
            Value::Int32(v) => Some(v.into()),
            Value::Int64(v) => Some(v),
            Value::UInt8(v) => Some(v.into()),
            Value::UInt16(v) => Some(v.into()),
            Value::UInt32(v) => Some(v.into()),
            Value::UInt64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }
}

/// Result type of a column, as reported by its decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Only NULL can be produced
    Null,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Date,
    DateTime,
    Array(Box<ValueKind>),
    Nullable(Box<ValueKind>),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Array(inner) => write!(f, "Array({inner})"),
            ValueKind::Nullable(inner) => write!(f, "Nullable({inner})"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}
