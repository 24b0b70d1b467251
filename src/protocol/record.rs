use memchr::memchr;

/// Strip exactly one trailing `\n`
pub fn trim_record(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

/// Split a line into its tab-separated fields.
///
/// One trailing `\n` is trimmed first. An empty line yields a single empty field.
/// Fields keep their wire escaping.
pub fn split_record(line: &[u8]) -> Fields<'_> {
    Fields {
        rest: Some(trim_record(line)),
    }
}

/// Iterator over the raw fields of one record
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest?;
        match memchr(b'\t', rest) {
            Some(i) => {
                self.rest = Some(&rest[i + 1..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
