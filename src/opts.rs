use smart_default::SmartDefault;

use crate::buffer::DEFAULT_READ_BUFFER_SIZE;
use crate::decode::{DecoderOptions, Zone, resolve_zone};
use crate::error::Error;

/// Options for decoding a result set
///
/// ```rs
/// let mut opts1 = Opts::default();
/// opts1.read_buffer_size = 64 * 1024;
///
/// let opts2 = Opts::try_from("http://localhost:8123/?location=Europe/Berlin&use_db_location=true")?;
/// ```
#[derive(Debug, Clone, SmartDefault)]
pub struct Opts {
    /// Time zone applied to DateTime values
    #[default(Zone::UTC)]
    pub location: Zone,

    /// Prefer the zone declared by a column (`DateTime('UTC')`) over `location`
    pub use_db_location: bool,

    /// Capacity of the line reader's bounded buffer. Longer lines are reassembled.
    #[default(DEFAULT_READ_BUFFER_SIZE)]
    pub read_buffer_size: usize,
}

impl Opts {
    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions {
            location: self.location,
            use_db_location: self.use_db_location,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, Error> {
    match value {
        "1" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(Error::BadConfigError(format!(
            "Invalid boolean '{}' for '{}'",
            value, key
        ))),
    }
}

impl TryFrom<&str> for Opts {
    type Error = Error;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::BadConfigError(format!("Failed to parse ClickHouse URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https" | "clickhouse") {
            return Err(Error::BadConfigError(format!(
                "Invalid URL scheme '{}', expected 'http', 'https' or 'clickhouse'",
                parsed.scheme()
            )));
        }

        let mut opts = Self::default();
        // Remaining parameters belong to the transport
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "location" => {
                    opts.location = resolve_zone(&value).map_err(|e| {
                        Error::BadConfigError(format!("Invalid location '{}': {}", value, e))
                    })?;
                }
                "use_db_location" => opts.use_db_location = parse_bool(&key, &value)?,
                "read_buffer_size" => {
                    opts.read_buffer_size = value
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| {
                            Error::BadConfigError(format!(
                                "Invalid read_buffer_size '{}'",
                                value
                            ))
                        })?;
                }
                _ => {}
            }
        }
        Ok(opts)
    }
}
