use std::fmt;

use simdutf8::basic::from_utf8;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, OffsetResult, PrimitiveDateTimeExt, TimeZone, Tz, timezones};

use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATETIME64_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");
const OFFSET_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

const DATE_LEN: usize = 10;
const DATETIME_LEN: usize = 19;

/// Servers without a value for a date column send all zeroes
const ZERO_DATE: &[u8] = b"0000-00-00";

/// A time zone that temporal values are interpreted in
#[derive(Clone, Copy)]
pub enum Zone {
    /// A fixed offset such as `+05:30` or `Etc/GMT-3`
    Fixed(UtcOffset),
    /// An IANA zone from the bundled tz database, with its DST rules
    Named(&'static Tz),
}

impl Zone {
    pub const UTC: Zone = Zone::Fixed(UtcOffset::UTC);

    /// Attach this zone to a wall-clock reading.
    ///
    /// An ambiguous reading (DST fall-back) takes the earlier instant. A reading inside a
    /// DST gap takes the offset in force at the same wall-clock time in UTC.
    pub fn assume(&self, dt: PrimitiveDateTime) -> OffsetDateTime {
        match self {
            Zone::Fixed(offset) => dt.assume_offset(*offset),
            Zone::Named(tz) => match dt.assume_timezone(*tz) {
                OffsetResult::Some(t) => t,
                OffsetResult::Ambiguous(a, b) => a.min(b),
                OffsetResult::None => {
                    dt.assume_offset(tz.get_offset_utc(&dt.assume_utc()).to_utc())
                }
            },
        }
    }

    /// Express the instant `t` in this zone
    pub fn convert(&self, t: OffsetDateTime) -> OffsetDateTime {
        match self {
            Zone::Fixed(offset) => t.to_offset(*offset),
            Zone::Named(tz) => t.to_offset(tz.get_offset_utc(&t).to_utc()),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Zone::Fixed(offset) => offset.to_string(),
            Zone::Named(tz) => tz.name().to_string(),
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::UTC
    }
}

impl From<UtcOffset> for Zone {
    fn from(offset: UtcOffset) -> Self {
        Zone::Fixed(offset)
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Zone::Fixed(a), Zone::Fixed(b)) => a == b,
            (Zone::Named(a), Zone::Named(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl Eq for Zone {}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Fixed(offset) => f.debug_tuple("Fixed").field(offset).finish(),
            Zone::Named(tz) => f.debug_tuple("Named").field(&tz.name()).finish(),
        }
    }
}

/// Resolve a time zone name.
///
/// UTC aliases, `Etc/GMT±N` (POSIX sign, so `Etc/GMT-3` is UTC+3) and literal offsets
/// such as `+05:30` become fixed offsets. Anything else is looked up in the tz database.
pub fn resolve_zone(name: &str) -> Result<Zone> {
    match name {
        "UTC" | "UCT" | "GMT" | "GMT0" | "Z" | "Zulu" | "Universal" | "Greenwich" | "Etc/UTC"
        | "Etc/UCT" | "Etc/GMT" | "Etc/GMT0" | "Etc/Universal" | "Etc/Zulu" | "Etc/Greenwich" => {
            return Ok(Zone::UTC);
        }
        _ => {}
    }

    if let Some(hours) = name.strip_prefix("Etc/GMT") {
        return hours
            .parse::<i8>()
            .ok()
            .filter(|h| (-14..=12).contains(h))
            .and_then(|h| UtcOffset::from_hms(-h, 0, 0).ok())
            .map(Zone::Fixed)
            .ok_or_else(|| Error::UnsupportedTimeZone(name.to_string()));
    }

    if let Ok(offset) = UtcOffset::parse(name, OFFSET_FORMAT) {
        return Ok(Zone::Fixed(offset));
    }

    timezones::get_by_name(name)
        .map(Zone::Named)
        .ok_or_else(|| Error::UnsupportedTimeZone(name.to_string()))
}

/// Split a fixed-width temporal literal off the front of `input`
fn take_literal<'a>(
    input: &'a [u8],
    len: usize,
    quoted: bool,
    kind: &'static str,
) -> Result<(&'a [u8], &'a [u8])> {
    let body = if quoted {
        input
            .strip_prefix(b"'")
            .ok_or_else(|| Error::parse(kind, input))?
    } else {
        input
    };
    if body.len() < len {
        return Err(Error::parse(kind, input));
    }
    let (text, rest) = body.split_at(len);
    if !quoted {
        return Ok((text, rest));
    }
    let rest = rest
        .strip_prefix(b"'")
        .ok_or_else(|| Error::parse(kind, input))?;
    Ok((text, rest))
}

/// `YYYY-MM-DD`
#[derive(Debug)]
pub struct DateDecoder {
    quoted: bool,
}

impl DateDecoder {
    pub fn new(quoted: bool) -> Self {
        Self { quoted }
    }
}

impl Decoder for DateDecoder {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let (text, rest) = take_literal(input, DATE_LEN, self.quoted, "Date")?;
        if text == ZERO_DATE {
            return Ok((Value::Date(OffsetDateTime::UNIX_EPOCH.date()), rest));
        }
        match Date::parse(from_utf8(text)?, DATE_FORMAT) {
            Ok(date) => Ok((Value::Date(date), rest)),
            Err(_) => Err(Error::parse("Date", text)),
        }
    }

    fn kind(&self) -> ValueKind {
        ValueKind::Date
    }
}

/// `YYYY-MM-DD hh:mm:ss`, followed by `.` and `precision` digits for DateTime64
#[derive(Debug)]
pub struct DateTimeDecoder {
    zone: Zone,
    precision: u8,
    quoted: bool,
}

impl DateTimeDecoder {
    pub fn new(zone: Zone, precision: u8, quoted: bool) -> Self {
        Self {
            zone,
            precision,
            quoted,
        }
    }

    fn literal_len(&self) -> usize {
        match self.precision {
            0 => DATETIME_LEN,
            p => DATETIME_LEN + 1 + usize::from(p),
        }
    }
}

impl Decoder for DateTimeDecoder {
    fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let (text, rest) = take_literal(input, self.literal_len(), self.quoted, "DateTime")?;
        if text.starts_with(ZERO_DATE) {
            let epoch = self.zone.convert(OffsetDateTime::UNIX_EPOCH);
            return Ok((Value::DateTime(epoch), rest));
        }
        let format = if self.precision == 0 {
            DATETIME_FORMAT
        } else {
            DATETIME64_FORMAT
        };
        match PrimitiveDateTime::parse(from_utf8(text)?, format) {
            Ok(dt) => Ok((Value::DateTime(self.zone.assume(dt)), rest)),
            Err(_) => Err(Error::parse("DateTime", text)),
        }
    }

    fn kind(&self) -> ValueKind {
        ValueKind::DateTime
    }
}
