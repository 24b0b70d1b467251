//! Blocking result-set reading over [`std::io::Read`].

mod rows;
mod stream;

pub use rows::Rows;
pub use stream::LineReader;
