//! Streaming decoder for ClickHouse `TabSeparatedWithNamesAndTypes` result sets.
//!
//! The response body is read one line at a time through a bounded buffer. The two header
//! lines bind a [`decode::Decoder`] to every column, and each data line is decoded into
//! caller-owned [`Value`] slots.

pub mod buffer;
pub mod cancel;
pub mod col;
pub mod decode;
pub mod error;
mod opts;
pub mod protocol;
pub mod value;

pub use cancel::CancelHook;
pub use col::Column;
pub use decode::Zone;
pub use opts::Opts;
pub use value::{Value, ValueKind};

#[cfg(feature = "sync")]
pub mod sync;

#[cfg(feature = "tokio")]
pub mod tokio;
