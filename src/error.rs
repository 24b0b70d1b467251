use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Bad config error: {0}")]
    BadConfigError(String),

    #[error("Bad usage error: {0}")]
    BadUsageError(String),

    #[error("Missing {0} line in result set header")]
    MissingHeader(&'static str),

    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("Invalid type descriptor '{desc}': {reason}")]
    InvalidTypeDesc { desc: String, reason: String },

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Unsupported time zone: {0}")]
    UnsupportedTimeZone(String),

    #[error("Column count mismatch: expected {expected}, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("Cannot parse {kind} from '{input}'")]
    ParseError { kind: &'static str, input: String },

    #[error("trailing data after parsing the value")]
    TrailingData,

    #[error("Invalid UTF-8")]
    InvalidUtf8,
}

impl Error {
    pub(crate) fn parse(kind: &'static str, input: &[u8]) -> Self {
        Error::ParseError {
            kind,
            input: String::from_utf8_lossy(input).into_owned(),
        }
    }
}

impl From<simdutf8::basic::Utf8Error> for Error {
    fn from(_: simdutf8::basic::Utf8Error) -> Self {
        Error::InvalidUtf8
    }
}

pub type Result<T> = std::result::Result<T, Error>;
