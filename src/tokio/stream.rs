use tokio::io::{AsyncRead, AsyncReadExt};

use crate::buffer::{LineBuffer, Step};
use crate::error::Result;

/// Line reader over any [`AsyncRead`] stream
///
/// Uses the same framing as [`crate::sync::LineReader`]; only the reads suspend.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buffer: LineBuffer,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: LineBuffer::new(),
        }
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buffer: LineBuffer::with_capacity(capacity),
        }
    }

    /// Read the next line, ending in `\n` unless it is the last line of the stream.
    ///
    /// Returns `None` once the stream is exhausted.
    pub async fn read_line(&mut self) -> Result<Option<&[u8]>> {
        loop {
            match self.buffer.step() {
                Step::NeedData => {
                    let n = self.inner.read(self.buffer.spare()).await?;
                    self.buffer.filled(n);
                }
                Step::Line(line) => return Ok(Some(self.buffer.line(line))),
                Step::End => return Ok(None),
            }
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
