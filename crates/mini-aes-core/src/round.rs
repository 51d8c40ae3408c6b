//! Mini-AES round transformations on the 2×2 nibble state.

use crate::block::{xor_in_place, Block};
use crate::gf::gf_multiply;
use crate::sbox::{inv_sbox, sbox};

/// Column mixing matrix used during encryption.
pub const MIX_COLUMNS: [[u8; 2]; 2] = [[0x1, 0x4], [0x4, 0x1]];

/// Inverse of [`MIX_COLUMNS`] over GF(2^4).
pub const INV_MIX_COLUMNS: [[u8; 2]; 2] = [[0x9, 0x2], [0x2, 0x9]];

/// Applies SubNibbles to the state in place.
#[inline]
pub fn sub_nibbles(state: &mut Block) {
    for nibble in state.iter_mut().flatten() {
        *nibble = sbox(*nibble);
    }
}

/// Applies the inverse SubNibbles transformation.
#[inline]
pub fn inv_sub_nibbles(state: &mut Block) {
    for nibble in state.iter_mut().flatten() {
        *nibble = inv_sbox(*nibble);
    }
}

/// Swaps the two entries of row 1; row 0 is untouched.
#[inline]
pub fn shift_rows(state: &mut Block) {
    state[1].swap(0, 1);
}

/// Inverse ShiftRows. A single swap undoes itself.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    shift_rows(state);
}

fn mix_with(state: &mut Block, matrix: &[[u8; 2]; 2]) {
    for col in 0..2 {
        let (s0, s1) = (state[0][col], state[1][col]);
        state[0][col] = gf_multiply(matrix[0][0], s0) ^ gf_multiply(matrix[0][1], s1);
        state[1][col] = gf_multiply(matrix[1][0], s0) ^ gf_multiply(matrix[1][1], s1);
    }
}

/// MixColumns over both columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    mix_with(state, &MIX_COLUMNS);
}

/// Inverse MixColumns over both columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    mix_with(state, &INV_MIX_COLUMNS);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{block_from_u16, matrix_to_hex, parse_block};

    fn all_states() -> impl Iterator<Item = Block> {
        (0..=u16::MAX).map(block_from_u16)
    }

    #[test]
    fn known_outputs() {
        let state = parse_block("6F6B").unwrap();

        let mut s = state;
        sub_nibbles(&mut s);
        assert_eq!(matrix_to_hex(&s), "8783");

        let mut s = state;
        shift_rows(&mut s);
        assert_eq!(matrix_to_hex(&s), "6B6F");

        let mut s = state;
        mix_columns(&mut s);
        assert_eq!(matrix_to_hex(&s), "F4C0");
    }

    #[test]
    fn shift_rows_is_self_inverse() {
        for state in all_states() {
            let mut s = state;
            shift_rows(&mut s);
            shift_rows(&mut s);
            assert_eq!(s, state);
        }
    }

    #[test]
    fn mix_columns_inverts() {
        for state in all_states() {
            let mut s = state;
            mix_columns(&mut s);
            inv_mix_columns(&mut s);
            assert_eq!(s, state);

            let mut s = state;
            inv_mix_columns(&mut s);
            mix_columns(&mut s);
            assert_eq!(s, state);
        }
    }

    #[test]
    fn sub_nibbles_inverts() {
        for state in all_states() {
            let mut s = state;
            sub_nibbles(&mut s);
            inv_sub_nibbles(&mut s);
            assert_eq!(s, state);
        }
    }

    #[test]
    fn add_round_key_is_self_inverse() {
        let key = parse_block("A73B").unwrap();
        for state in all_states() {
            let mut s = state;
            add_round_key(&mut s, &key);
            add_round_key(&mut s, &key);
            assert_eq!(s, state);
        }
    }

    #[test]
    fn mix_matrices_multiply_to_identity() {
        for i in 0..2 {
            for j in 0..2 {
                let entry = gf_multiply(MIX_COLUMNS[i][0], INV_MIX_COLUMNS[0][j])
                    ^ gf_multiply(MIX_COLUMNS[i][1], INV_MIX_COLUMNS[1][j]);
                assert_eq!(entry, u8::from(i == j));
            }
        }
    }
}
