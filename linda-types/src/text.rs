//! Textual tuple format
//!
//! ```text
//! [ 1 -2.5 true 'c' "text" ?Integer [ 3 4 ] ]
//! ```
//!
//! Fields are whitespace separated. `?Type` is a wildcard, allowed at
//! any depth of a template. Strings and characters take the escapes
//! Rust's `Debug` writes (`\n`, `\"`, `\u{7f}`, ...), so `Display` on
//! [`Tuple`] and [`Template`] parses back to an equal value apart from
//! non-finite floats.

use crate::error::{Result, TupleError};
use crate::tuple::{Field, Template, Tuple};
use crate::value::{FieldType, Value};
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.skip_whitespace();
        self.chars.peek().copied()
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> Result<()> {
        match self.peek() {
            Some((_, c)) if c == wanted => {
                self.chars.next();
                Ok(())
            }
            Some((offset, found)) => Err(TupleError::UnexpectedToken { found, offset }),
            None => Err(TupleError::UnexpectedEnd { expected }),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self.peek() {
            Some((offset, _)) => Err(TupleError::TrailingInput(offset)),
            None => Ok(()),
        }
    }

    /// `[ field* ]` where fields may be wildcards or nested templates
    fn template(&mut self) -> Result<Template> {
        self.expect('[', "'['")?;
        let mut fields = Vec::new();
        loop {
            match self.peek() {
                Some((_, ']')) => {
                    self.chars.next();
                    return Ok(Template::new(fields));
                }
                Some((_, '?')) => {
                    self.chars.next();
                    fields.push(Field::Wildcard(self.type_name()?));
                }
                Some((_, '[')) => fields.push(Field::nested(self.template()?)),
                Some(_) => fields.push(Field::Bound(self.value()?)),
                None => return Err(TupleError::UnexpectedEnd { expected: "']'" }),
            }
        }
    }

    /// A scalar value; nested tuples are handled by `template`
    fn value(&mut self) -> Result<Value> {
        match self.peek() {
            Some((_, '"')) => self.string().map(Value::String),
            Some((_, '\'')) => self.character().map(Value::Character),
            Some((_, c)) if c == '-' || c.is_ascii_digit() => self.number(),
            Some((offset, c)) if c.is_alphabetic() => {
                let word = self.word(offset);
                match word {
                    "true" => Ok(Value::Boolean(true)),
                    "false" => Ok(Value::Boolean(false)),
                    _ => Err(TupleError::UnexpectedToken { found: c, offset }),
                }
            }
            Some((offset, found)) => Err(TupleError::UnexpectedToken { found, offset }),
            None => Err(TupleError::UnexpectedEnd { expected: "a value" }),
        }
    }

    fn word(&mut self, start: usize) -> &'a str {
        let mut end = start;
        while let Some(&(offset, c)) = self.chars.peek() {
            if !c.is_alphanumeric() && c != '_' {
                break;
            }
            end = offset + c.len_utf8();
            self.chars.next();
        }
        &self.source[start..end]
    }

    fn type_name(&mut self) -> Result<FieldType> {
        match self.chars.peek().copied() {
            Some((offset, c)) if c.is_alphabetic() => {
                let name = self.word(offset);
                FieldType::from_name(name).ok_or_else(|| TupleError::UnknownType(name.to_string()))
            }
            Some((offset, found)) => Err(TupleError::UnexpectedToken { found, offset }),
            None => Err(TupleError::UnexpectedEnd {
                expected: "a type name",
            }),
        }
    }

    fn number(&mut self) -> Result<Value> {
        let (start, _) = self.peek().ok_or(TupleError::UnexpectedEnd {
            expected: "a number",
        })?;
        let mut end = start;
        let mut is_float = false;
        while let Some(&(offset, c)) = self.chars.peek() {
            let after_exponent = matches!(self.source[..offset].chars().last(), Some('e' | 'E'));
            let part_of_number = c.is_ascii_digit()
                || matches!(c, '.' | 'e' | 'E')
                || (c == '-' && offset == start)
                || (matches!(c, '+' | '-') && after_exponent);
            if !part_of_number {
                break;
            }
            if matches!(c, '.' | 'e' | 'E') {
                is_float = true;
            }
            end = offset + c.len_utf8();
            self.chars.next();
        }

        let text = &self.source[start..end];
        let invalid = || TupleError::InvalidNumber(text.to_string());
        if is_float {
            text.parse::<f64>().map(Value::Float).map_err(|_| invalid())
        } else {
            text.parse::<i64>().map(Value::Integer).map_err(|_| invalid())
        }
    }

    fn escape(&mut self) -> Result<char> {
        match self.chars.next() {
            Some((_, 'n')) => Ok('\n'),
            Some((_, 't')) => Ok('\t'),
            Some((_, 'r')) => Ok('\r'),
            Some((_, '0')) => Ok('\0'),
            Some((_, 'u')) => self.unicode_escape(),
            Some((_, c @ ('\\' | '"' | '\''))) => Ok(c),
            Some((offset, found)) => Err(TupleError::UnexpectedToken { found, offset }),
            None => Err(TupleError::UnexpectedEnd {
                expected: "an escape sequence",
            }),
        }
    }

    /// `\u{hex}` with one to six digits
    fn unicode_escape(&mut self) -> Result<char> {
        match self.chars.next() {
            Some((_, '{')) => {}
            Some((offset, found)) => return Err(TupleError::UnexpectedToken { found, offset }),
            None => return Err(TupleError::UnexpectedEnd { expected: "'{'" }),
        }
        let mut digits = String::new();
        loop {
            match self.chars.next() {
                Some((_, '}')) => break,
                Some((_, c)) if c.is_ascii_hexdigit() && digits.len() < 6 => digits.push(c),
                Some((offset, found)) => {
                    return Err(TupleError::UnexpectedToken { found, offset })
                }
                None => return Err(TupleError::UnexpectedEnd { expected: "'}'" }),
            }
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or(TupleError::InvalidEscape(digits))
    }

    fn string(&mut self) -> Result<String> {
        self.chars.next();
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(out),
                Some((_, '\\')) => out.push(self.escape()?),
                Some((_, c)) => out.push(c),
                None => return Err(TupleError::UnexpectedEnd { expected: "'\"'" }),
            }
        }
    }

    fn character(&mut self) -> Result<char> {
        self.chars.next();
        let c = match self.chars.next() {
            Some((_, '\\')) => self.escape()?,
            Some((offset, '\'')) => {
                return Err(TupleError::UnexpectedToken { found: '\'', offset })
            }
            Some((_, c)) => c,
            None => {
                return Err(TupleError::UnexpectedEnd {
                    expected: "a character",
                })
            }
        };
        match self.chars.next() {
            Some((_, '\'')) => Ok(c),
            Some((offset, found)) => Err(TupleError::UnexpectedToken { found, offset }),
            None => Err(TupleError::UnexpectedEnd { expected: "'''" }),
        }
    }
}

/// Parse a template, wildcards allowed at the top level
pub fn parse_template(source: &str) -> Result<Template> {
    let mut parser = Parser::new(source);
    let template = parser.template()?;
    parser.finish()?;
    Ok(template)
}

/// Parse a fully bound tuple
pub fn parse_tuple(source: &str) -> Result<Tuple> {
    parse_template(source)?.to_tuple()
}

impl FromStr for Template {
    type Err = TupleError;

    fn from_str(s: &str) -> Result<Self> {
        parse_template(s)
    }
}

impl FromStr for Tuple {
    type Err = TupleError;

    fn from_str(s: &str) -> Result<Self> {
        parse_tuple(s)
    }
}
