use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::protocol::unquote::{into_string, read_quoted_into};

/// Structured form of a column type such as `Array(Nullable(DateTime('UTC')))`.
///
/// Literal arguments (numbers, quoted strings) are represented as argument-less
/// descriptors named after the literal. An enum entry `'a' = 1` becomes `a` with the
/// single argument `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    pub name: String,
    pub args: Vec<TypeDesc>,
}

impl TypeDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(name: impl Into<String>, args: Vec<TypeDesc>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl FromStr for TypeDesc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser {
            input: s.as_bytes(),
            pos: 0,
            depth: 0,
            source: s,
        };
        let desc = parser.desc()?;
        parser.skip_ws();
        if parser.pos != parser.input.len() {
            return Err(parser.error("unexpected data after type"));
        }
        Ok(desc)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Deepest type nesting accepted from a header line
const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn error(&self, reason: &str) -> Error {
        Error::InvalidTypeDesc {
            desc: self.source.to_string(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }

    fn skip_ws(&mut self) {
        while self
            .input
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        self.skip_ws();
        if self.input.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn atom(&mut self) -> Result<String> {
        self.skip_ws();
        let input = self.input;
        let rest = &input[self.pos..];
        if rest.first() == Some(&b'\'') {
            let mut out = Vec::new();
            let after = read_quoted_into(rest, &mut out)
                .map_err(|e| self.error(&e.to_string()))?;
            self.pos = input.len() - after.len();
            return into_string(out);
        }

        let len = rest
            .iter()
            .position(|&b| !is_ident_byte(b))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected a type name"));
        }
        self.pos += len;
        into_string(rest[..len].to_vec())
    }

    fn desc(&mut self) -> Result<TypeDesc> {
        let name = self.atom()?;
        let mut args = Vec::new();
        if self.eat(b'(') && !self.eat(b')') {
            self.depth += 1;
            if self.depth > MAX_DEPTH {
                return Err(self.error("type is nested too deeply"));
            }
            loop {
                let mut arg = self.desc()?;
                if self.eat(b'=') {
                    arg.args.push(TypeDesc::new(self.atom()?));
                }
                args.push(arg);
                if self.eat(b',') {
                    continue;
                }
                if self.eat(b')') {
                    break;
                }
                return Err(self.error("expected ',' or ')'"));
            }
            self.depth -= 1;
        }
        Ok(TypeDesc { name, args })
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-' | b'+' | b'/' | b':')
}
