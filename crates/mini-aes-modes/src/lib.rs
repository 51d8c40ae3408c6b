//! Hex-text operations over the Mini-AES block cipher.
//!
//! Every operation takes hex strings (either case), returns uppercase hex,
//! and reports its full step-by-step trace through [`Traced`], whether it
//! succeeds or not.
//!
//! ```
//! let traced = mini_aes_modes::ecb::encrypt("6F6B6F6B", "A73B");
//! let ciphertext = traced.into_result().unwrap();
//! assert_eq!(&ciphertext[..4], &ciphertext[4..]);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cbc;
pub mod ecb;
mod job;
pub mod message;
mod outcome;
pub mod single;

pub use crate::job::{Job, Mode, Operation, UnknownName};
pub use crate::outcome::Traced;
pub use mini_aes_core::{Error, ErrorKind, Field, FormatError, Trace};
