//! Saved records of Mini-AES operations.
//!
//! A record holds the operation type, cipher mode, input, key, optional IV,
//! output and the full trace. The text form is a fixed sequence of CSV rows
//! (`Field,Value` header, one row per parameter, then a `Log` row followed by
//! one row per trace line); the binary form is `bincode`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod csv;
mod error;
mod record;

pub use crate::csv::RowError;
pub use crate::error::RecordError;
pub use crate::record::Record;
