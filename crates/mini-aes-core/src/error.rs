//! Error types shared by the cipher and the chaining modes.

use std::fmt;

/// Which piece of caller input an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// A message block, by position. CBC ciphertext numbers blocks after the IV.
    Block(usize),
    /// The cipher key.
    Key,
    /// An initialization vector, supplied by the caller or leading CBC ciphertext.
    Iv,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Block(index) => write!(f, "block {index}"),
            Field::Key => write!(f, "key"),
            Field::Iv => write!(f, "IV"),
        }
    }
}

/// Reasons a piece of text is not a valid 4-digit hex block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// Text was not exactly four characters long.
    Length {
        /// Length found, in bytes.
        found: usize,
    },
    /// A character outside `[0-9A-Fa-f]` was found.
    InvalidDigit {
        /// The offending character.
        found: char,
        /// Its byte offset within the block text.
        index: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Length { found } => {
                write!(f, "expected 4 hex characters, found {found}")
            }
            FormatError::InvalidDigit { found, index } => {
                write!(f, "invalid hex character {found:?} at position {index}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Coarse error category reported to front ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed block, key or IV text.
    Format,
    /// Message length does not divide into whole blocks.
    Alignment,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Format => write!(f, "format error"),
            ErrorKind::Alignment => write!(f, "alignment error"),
        }
    }
}

/// Errors produced by Mini-AES operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A block, key or IV was not exactly four hex digits.
    Format {
        /// Input the error refers to.
        field: Field,
        /// What was wrong with it.
        reason: FormatError,
    },
    /// Message length is not a multiple of the block size.
    Misaligned {
        /// Length of the message text.
        len: usize,
    },
    /// Message is shorter than the mode requires.
    TooShort {
        /// Length of the message text.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },
}

impl Error {
    /// Builds a format error for `field`.
    pub fn format(field: Field, reason: FormatError) -> Self {
        Error::Format { field, reason }
    }

    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format { .. } => ErrorKind::Format,
            Error::Misaligned { .. } | Error::TooShort { .. } => ErrorKind::Alignment,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format { field, reason } => write!(f, "{field}: {reason}"),
            Error::Misaligned { len } => {
                write!(f, "text length {len} is not a multiple of 4 hex characters")
            }
            Error::TooShort { len, min } => {
                write!(f, "text length {len} is shorter than the minimum of {min}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Error::Format { reason, .. } = self {
            Some(reason)
        } else {
            None
        }
    }
}
