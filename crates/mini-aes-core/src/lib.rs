//! Mini-AES: a 16-bit teaching variant of AES.
//!
//! This crate mirrors the AES round structure at nibble scale and provides:
//! - GF(2^4) arithmetic and the 4-bit S-box.
//! - Conversions between hex text and the 2×2 nibble state.
//! - The three-round key schedule.
//! - Single-block encryption and decryption with a step-by-step [`Trace`].
//!
//! The cipher is for study only; a 16-bit key offers no security.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod codec;
mod error;
mod gf;
mod key;
pub mod round;
mod sbox;
mod trace;

pub use crate::block::{xor, xor_in_place, xor_words, Block, Word};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::codec::{
    block_from_u16, block_to_u16, hex_to_nibbles, matrix_to_hex, matrix_to_nibbles,
    nibbles_to_matrix, parse_block, word_to_hex, BLOCK_HEX_LEN,
};
pub use crate::error::{Error, ErrorKind, Field, FormatError};
pub use crate::gf::gf_multiply;
pub use crate::key::{Key, RoundKeys, NUM_ROUNDS};
pub use crate::sbox::{inv_sbox, sbox, INV_S_BOX, S_BOX};
pub use crate::trace::Trace;
