//! Async result-set reading over [`tokio::io::AsyncRead`].

mod rows;
mod stream;

pub use rows::Rows;
pub use stream::LineReader;
