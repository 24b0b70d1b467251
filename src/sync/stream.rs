use std::io::{ErrorKind, Read};

use crate::buffer::{LineBuffer, Step};
use crate::error::Result;

/// Blocking line reader over any [`Read`] stream
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buffer: LineBuffer,
}

impl<R: Read> LineReader<R> {
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
    pub fn read_line(&mut self) -> Result<Option<&[u8]>> {
        loop {
            match self.buffer.step() {
                Step::NeedData => {
                    let n = read_retrying(&mut self.inner, self.buffer.spare())?;
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

fn read_retrying<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
