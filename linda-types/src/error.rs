//! Error types for tuple construction and parsing

use crate::value::FieldType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TupleError {
    /// A template was supplied where a fully bound tuple is required
    #[error("field {position} is a ?{field_type} wildcard, expected a bound value")]
    Unbound {
        position: usize,
        field_type: FieldType,
    },

    #[error("unexpected {found:?} at offset {offset}")]
    UnexpectedToken { found: char, offset: usize },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unknown field type ?{0}")]
    UnknownType(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("invalid unicode escape \\u{{{0}}}")]
    InvalidEscape(String),
}

pub type Result<T> = std::result::Result<T, TupleError>;
