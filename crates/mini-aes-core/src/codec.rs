//! Conversions between hex text, nibbles and the state matrix.
//!
//! Nibbles fill the matrix column-major: `[n0, n1, n2, n3]` becomes
//! `[[n0, n2], [n1, n3]]`.

use crate::block::{Block, Word};
use crate::error::FormatError;

/// Number of hex characters in one block.
pub const BLOCK_HEX_LEN: usize = 4;

/// Parses exactly four hex digits (either case) into nibbles, most significant first.
pub fn hex_to_nibbles<T: AsRef<[u8]>>(text: T) -> Result<[u8; 4], FormatError> {
    let text = text.as_ref();
    if text.len() != BLOCK_HEX_LEN {
        return Err(FormatError::Length { found: text.len() });
    }
    let mut bytes = [0u8; 2];
    hex::decode_to_slice(text, &mut bytes).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            FormatError::InvalidDigit { found: c, index }
        }
        _ => FormatError::Length { found: text.len() },
    })?;
    Ok([bytes[0] >> 4, bytes[0] & 0x0f, bytes[1] >> 4, bytes[1] & 0x0f])
}

/// Places four nibbles into a state matrix, column-major.
pub fn nibbles_to_matrix(nibbles: [u8; 4]) -> Block {
    let [n0, n1, n2, n3] = nibbles.map(|n| n & 0x0f);
    [[n0, n2], [n1, n3]]
}

/// Flattens a state matrix back to nibbles, column-major.
pub fn matrix_to_nibbles(matrix: &Block) -> [u8; 4] {
    [matrix[0][0], matrix[1][0], matrix[0][1], matrix[1][1]]
}

/// Renders a state matrix as four uppercase hex digits.
pub fn matrix_to_hex(matrix: &Block) -> String {
    format!("{:04X}", block_to_u16(matrix))
}

/// Parses four hex digits straight into a state matrix.
pub fn parse_block<T: AsRef<[u8]>>(text: T) -> Result<Block, FormatError> {
    hex_to_nibbles(text).map(nibbles_to_matrix)
}

/// Builds a state matrix from a 16-bit value.
pub fn block_from_u16(value: u16) -> Block {
    let [hi, lo] = value.to_be_bytes();
    nibbles_to_matrix([hi >> 4, hi & 0x0f, lo >> 4, lo & 0x0f])
}

/// Packs a state matrix into a 16-bit value.
pub fn block_to_u16(matrix: &Block) -> u16 {
    matrix_to_nibbles(matrix)
        .iter()
        .fold(0u16, |acc, &n| (acc << 4) | u16::from(n & 0x0f))
}

/// Renders a key-schedule word as two uppercase hex digits.
pub fn word_to_hex(word: Word) -> String {
    format!("{:X}{:X}", word[0] & 0x0f, word[1] & 0x0f)
}
