use crate::col::Column;
use crate::error::{Error, Result};
use crate::protocol::record::{split_record, trim_record};
use crate::value::Value;

/// What became of one data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Every slot of the row was written
    Row,
    /// The line was a totals separator; read the next one
    Skip,
}

/// Output slots must match the column count exactly
pub fn check_slots(columns: &[Column], dest: &[Value]) -> Result<()> {
    if dest.len() != columns.len() {
        return Err(Error::BadUsageError(format!(
            "row has {} columns but {} output slots were given",
            columns.len(),
            dest.len()
        )));
    }
    Ok(())
}

/// Decode one data line into `dest`.
///
/// A line made of a single empty field is ambiguous: it is either a one-column row holding
/// an empty value or the blank line the server puts before a totals row. With two or more
/// columns it is skipped outright. With one column it is decoded, and skipped only if
/// decoding fails.
///
/// On error `dest` may be partially overwritten.
pub fn decode_row(columns: &[Column], line: &[u8], dest: &mut [Value]) -> Result<RowOutcome> {
    let may_skip = trim_record(line).is_empty();
    if may_skip && columns.len() > 1 {
        return Ok(RowOutcome::Skip);
    }

    let mut fields = split_record(line);
    for (i, (col, slot)) in columns.iter().zip(dest.iter_mut()).enumerate() {
        let Some(field) = fields.next() else {
            return Err(Error::ColumnCountMismatch {
                expected: columns.len(),
                actual: i,
            });
        };
        match col.decode_field(field) {
            Ok(value) => *slot = value,
            Err(_) if may_skip => return Ok(RowOutcome::Skip),
            Err(err) => return Err(err),
        }
    }

    let extra = fields.count();
    if extra > 0 {
        return Err(Error::ColumnCountMismatch {
            expected: columns.len(),
            actual: columns.len() + extra,
        });
    }
    Ok(RowOutcome::Row)
}
