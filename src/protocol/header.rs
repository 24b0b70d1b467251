use simdutf8::basic::from_utf8;

use crate::col::Column;
use crate::decode::{DecoderOptions, new_decoder};
use crate::error::{Error, Result};
use crate::protocol::record::split_record;
use crate::protocol::type_desc::TypeDesc;
use crate::protocol::unquote::read_unquoted;

/// Parse the first header line into column names
pub fn read_column_names(line: &[u8]) -> Result<Vec<String>> {
    split_record(line)
        .map(|field| Ok(from_utf8(field)?.to_string()))
        .collect()
}

/// Parse the second header line and bind a decoder to every column.
///
/// Each type field is unescaped, parsed as a [`TypeDesc`] and handed to the decoder
/// factory. Any failure aborts the whole header.
pub fn resolve_columns(
    names: Vec<String>,
    type_line: &[u8],
    opts: &DecoderOptions,
) -> Result<Vec<Column>> {
    let type_names = split_record(type_line)
        .map(read_unquoted)
        .collect::<Result<Vec<_>>>()?;
    if type_names.len() != names.len() {
        return Err(Error::ColumnCountMismatch {
            expected: names.len(),
            actual: type_names.len(),
        });
    }

    names
        .into_iter()
        .zip(type_names)
        .map(|(name, type_name)| {
            let desc: TypeDesc = type_name.parse()?;
            let decoder = new_decoder(&desc, opts)?;
            Ok(Column::new(name, type_name, decoder))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    fn names(line: &[u8]) -> Vec<String> {
        read_column_names(line).unwrap()
    }

    #[test]
    fn test_column_names() {
        assert_eq!(names(b"id\tname\n"), vec!["id", "name"]);
        assert_eq!(names(b"\n"), vec![""]);
    }

    #[test]
    fn test_resolve() {
        let cols = resolve_columns(
            names(b"a\tb\n"),
            b"Int32\tDateTime(\\'UTC\\')\n",
            &DecoderOptions::default(),
        )
        .unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].value_kind(), ValueKind::Int32);
        assert_eq!(cols[1].type_name(), "DateTime('UTC')");
        assert_eq!(cols[1].value_kind(), ValueKind::DateTime);
    }

    #[test]
    fn test_count_mismatch() {
        let result = resolve_columns(names(b"a\tb\n"), b"Int32\n", &DecoderOptions::default());
        assert!(matches!(
            result,
            Err(Error::ColumnCountMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_bad_types() {
        let opts = DecoderOptions::default();
        assert!(matches!(
            resolve_columns(names(b"a\n"), b"'Int32\n", &opts),
            Err(Error::InvalidLiteral(_))
        ));
        assert!(matches!(
            resolve_columns(names(b"a\n"), b"Array(Int32\n", &opts),
            Err(Error::InvalidTypeDesc { .. })
        ));
        assert!(matches!(
            resolve_columns(names(b"a\n"), b"Widget\n", &opts),
            Err(Error::UnsupportedType(_))
        ));
    }
}
