//! Key types for Mini-AES.

use std::fmt;

use crate::block::Block;
use crate::codec::{hex_to_nibbles, matrix_to_hex};
use crate::error::FormatError;

/// Number of full rounds.
pub const NUM_ROUNDS: usize = 3;

/// 16-bit Mini-AES key, held as four nibbles, most significant first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key(pub [u8; 4]);

impl Key {
    /// Parses a key from four hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(text: T) -> Result<Self, FormatError> {
        hex_to_nibbles(text).map(Self)
    }

    /// Returns the key nibbles.
    pub fn nibbles(&self) -> [u8; 4] {
        self.0
    }
}

impl From<[u8; 4]> for Key {
    fn from(value: [u8; 4]) -> Self {
        Self(value.map(|n| n & 0x0f))
    }
}

impl From<u16> for Key {
    fn from(value: u16) -> Self {
        let [hi, lo] = value.to_be_bytes();
        Self([hi >> 4, hi & 0x0f, lo >> 4, lo & 0x0f])
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for n in self.0 {
            write!(f, "{:X}", n & 0x0f)?;
        }
        Ok(())
    }
}

/// Expanded round keys RK0..=RK3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; NUM_ROUNDS + 1]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=3).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Renders every round key as hex, in round order.
    pub fn to_hex(&self) -> Vec<String> {
        self.0.iter().map(matrix_to_hex).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let key = Key::from_hex("a73b").unwrap();
        assert_eq!(key.nibbles(), [0xa, 0x7, 0x3, 0xb]);
        assert_eq!(key.to_string(), "A73B");
        assert_eq!(Key::from(0xa73bu16), key);
    }

    #[test]
    fn rejects_short_key() {
        assert_eq!(Key::from_hex("A73"), Err(FormatError::Length { found: 3 }));
    }
}
