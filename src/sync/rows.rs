use std::io::Read;

use crate::cancel::CancelHook;
use crate::col::Column;
use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::protocol::{RowOutcome, check_slots, decode_row, read_column_names, resolve_columns};
use crate::sync::LineReader;
use crate::value::{Value, ValueKind};

/// A TabSeparatedWithNamesAndTypes result set read from a blocking stream
///
/// ```rs
/// let mut rows = Rows::open(response_body, &Opts::default())?;
/// let mut row = vec![Value::Null; rows.column_count()];
/// while rows.next(&mut row)? {
///     println!("{row:?}");
/// }
/// rows.close();
/// ```
#[derive(Debug)]
pub struct Rows<R> {
    reader: LineReader<R>,
    columns: Vec<Column>,
    cancel: Option<CancelHook>,
}

impl<R: Read> Rows<R> {
    /// Read both header lines and bind a decoder to every column
    #[tracing::instrument(skip_all)]
    pub fn open(stream: R, opts: &Opts) -> Result<Self> {
        let mut reader = LineReader::with_capacity(opts.read_buffer_size, stream);

        let names = match reader.read_line()? {
            Some(line) => read_column_names(line)?,
            None => return Err(Error::MissingHeader("column names")),
        };
        let columns = match reader.read_line()? {
            Some(line) => resolve_columns(names, line, &opts.decoder_options())?,
            None => return Err(Error::MissingHeader("column types")),
        };
        tracing::debug!(columns = columns.len(), "opened result set");

        Ok(Self {
            reader,
            columns,
            cancel: None,
        })
    }

    /// Attach the owning connection's cancel hook, cleared on [`close`](Self::close)
    pub fn with_cancel_hook(mut self, hook: CancelHook) -> Self {
        self.cancel = Some(hook);
        self
    }

    /// Decode the next row into `dest`, which must hold one slot per column.
    ///
    /// Returns `false` when there are no more rows. Blank separator lines emitted before a
    /// totals row are skipped.
    pub fn next(&mut self, dest: &mut [Value]) -> Result<bool> {
        check_slots(&self.columns, dest)?;
        loop {
            let Some(line) = self.reader.read_line()? else {
                return Ok(false);
            };
            match decode_row(&self.columns, line, dest)? {
                RowOutcome::Row => return Ok(true),
                RowOutcome::Skip => tracing::trace!("skipped totals separator line"),
            }
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Type name of column `index` as sent by the server
    pub fn declared_type_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(Column::type_name)
    }

    pub fn value_kind(&self, index: usize) -> Option<ValueKind> {
        self.columns.get(index).map(Column::value_kind)
    }

    /// Release the stream and clear the connection's cancel hook
    pub fn close(self) {
        if let Some(hook) = &self.cancel {
            hook.clear();
        }
        tracing::debug!(columns = self.columns.len(), "closed result set");
    }
}
