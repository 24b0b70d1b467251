//! The TabSeparatedWithNamesAndTypes wire format, independent of any I/O.

pub mod header;
pub mod record;
pub mod row;
pub mod type_desc;
pub mod unquote;

pub use header::{read_column_names, resolve_columns};
pub use record::{Fields, split_record};
pub use row::{RowOutcome, check_slots, decode_row};
pub use type_desc::TypeDesc;
