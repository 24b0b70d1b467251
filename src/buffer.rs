use memchr::memchr;

/// Default capacity of the bounded read buffer
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// What the framer needs next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Needs more bytes in [`LineBuffer::spare`]
    NeedData,
    /// A complete line is available through [`LineBuffer::line`]
    Line(Line),
    /// The stream ended and every byte has been returned
    End,
}

/// Handle to a framed line. Valid until the next call to [`LineBuffer::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    source: LineSource,
    at_eof: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineSource {
    Buffer { start: usize, end: usize },
    Reassembled,
}

/// Sans-IO line framer over a fixed-capacity read buffer.
///
/// The driver calls [`step`](Self::step) and, on [`Step::NeedData`], reads into
/// [`spare`](Self::spare) and reports the count with [`filled`](Self::filled).
/// Lines longer than the capacity are accumulated into a reassembly buffer that is
/// cleared, not reallocated, between lines.
#[derive(Debug)]
pub struct LineBuffer {
    /// Bounded read buffer. `buf[start..end]` holds unconsumed bytes.
    buf: Box<[u8]>,
    start: usize,
    end: usize,

    /// Bytes of `buf[start..end]` already known to contain no newline
    scanned: usize,

    /// The underlying stream reported end of input
    eof: bool,

    /// Holds a line that overflowed `buf`
    reassembly: Vec<u8>,
    reassembling: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_READ_BUFFER_SIZE)
    }

    /// Create a framer whose read buffer holds `capacity` bytes (at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            start: 0,
            end: 0,
            scanned: 0,
            eof: false,
            reassembly: Vec::new(),
            reassembling: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Drive the framer forward
    pub fn step(&mut self) -> Step {
        loop {
            let from = self.start + self.scanned;
            if let Some(i) = memchr(b'\n', &self.buf[from..self.end]) {
                let line_end = from + i + 1;
                let start = std::mem::replace(&mut self.start, line_end);
                self.scanned = 0;
                return Step::Line(self.finish(start, line_end, false));
            }
            self.scanned = self.end - self.start;

            if self.eof {
                let start = std::mem::replace(&mut self.start, self.end);
                self.scanned = 0;
                if start == self.end && !self.reassembling {
                    return Step::End;
                }
                return Step::Line(self.finish(start, self.end, true));
            }

            if self.scanned < self.buf.len() {
                return Step::NeedData;
            }

            // Buffer is full and holds no newline
            if !self.reassembling {
                self.reassembly.clear();
                self.reassembling = true;
            }
            self.reassembly
                .extend_from_slice(&self.buf[self.start..self.end]);
            tracing::trace!(
                partial = self.reassembly.len(),
                "line exceeds read buffer, reassembling"
            );
            self.start = self.end;
            self.scanned = 0;
        }
    }

    fn finish(&mut self, start: usize, end: usize, at_eof: bool) -> Line {
        let source = if self.reassembling {
            self.reassembly.extend_from_slice(&self.buf[start..end]);
            self.reassembling = false;
            LineSource::Reassembled
        } else {
            LineSource::Buffer { start, end }
        };
        Line { source, at_eof }
    }

    /// Compact unconsumed bytes to the front and return the free tail of the read buffer
    pub fn spare(&mut self) -> &mut [u8] {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        &mut self.buf[self.end..]
    }

    /// Record that `n` bytes were written into [`spare`](Self::spare). Zero means end of stream.
    pub fn filled(&mut self, n: usize) {
        if n == 0 {
            self.eof = true;
        } else {
            self.end = (self.end + n).min(self.buf.len());
        }
    }

    /// Resolve a framed line to its bytes with the terminator normalized.
    ///
    /// `\r\n` becomes `\n`. A final line without `\n` loses a single trailing `\r`.
    pub fn line(&mut self, line: Line) -> &[u8] {
        let bytes: &mut [u8] = match line.source {
            LineSource::Buffer { start, end } => &mut self.buf[start..end],
            LineSource::Reassembled => &mut self.reassembly[..],
        };

        let mut len = bytes.len();
        if line.at_eof && bytes.last() == Some(&b'\r') {
            len -= 1;
        }
        if len >= 2 && bytes[len - 2] == b'\r' && bytes[len - 1] == b'\n' {
            bytes[len - 2] = b'\n';
            len -= 1;
        }
        &bytes[..len]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
