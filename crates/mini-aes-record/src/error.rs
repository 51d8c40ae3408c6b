//! Errors raised while reading or writing records.

use std::fmt;

use crate::csv::RowError;

/// Errors produced by record export and import.
#[derive(Debug)]
pub enum RecordError {
    /// The text ended before a required row.
    MissingField(&'static str),
    /// A row did not have the expected name or shape.
    UnexpectedRow {
        /// 1-based line number.
        line: usize,
        /// Name of the row that was expected.
        expected: &'static str,
        /// The line as found.
        found: String,
    },
    /// A field value could not be interpreted.
    InvalidValue {
        /// Row name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A line could not be split into CSV fields.
    Row {
        /// 1-based line number.
        line: usize,
        /// Decoding failure.
        source: RowError,
    },
    /// A value contained a line break, which the text form cannot hold.
    LineBreak(&'static str),
    /// Binary encoding or decoding failed.
    Bincode(bincode::Error),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField(name) => write!(f, "record is missing {name:?}"),
            RecordError::UnexpectedRow {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected:?}, found {found:?}"),
            RecordError::InvalidValue { field, reason } => {
                write!(f, "invalid {field:?}: {reason}")
            }
            RecordError::Row { line, source } => match source {
                RowError::UnterminatedQuote => write!(f, "line {line}: unterminated quote"),
                RowError::TrailingAfterQuote => {
                    write!(f, "line {line}: unexpected text after closing quote")
                }
            },
            RecordError::LineBreak(name) => write!(f, "{name:?} contains a line break"),
            RecordError::Bincode(err) => write!(f, "binary record: {err}"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let RecordError::Bincode(err) = self {
            Some(err.as_ref())
        } else {
            None
        }
    }
}

impl From<bincode::Error> for RecordError {
    fn from(err: bincode::Error) -> Self {
        RecordError::Bincode(err)
    }
}
