//! Block representation helpers.

/// Mini-AES state: a 2×2 matrix of nibbles, indexed `[row][column]`.
pub type Block = [[u8; 2]; 2];

/// Two-nibble word used by the key schedule.
pub type Word = [u8; 2];

/// XORs two blocks nibble-wise, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (dst_row, rhs_row) in dst.iter_mut().zip(rhs.iter()) {
        for (d, r) in dst_row.iter_mut().zip(rhs_row.iter()) {
            *d = (*d ^ *r) & 0x0f;
        }
    }
}

/// Returns `lhs ^ rhs` nibble-wise.
#[inline]
pub fn xor(lhs: &Block, rhs: &Block) -> Block {
    let mut out = *lhs;
    xor_in_place(&mut out, rhs);
    out
}

/// XORs two words nibble-wise.
#[inline]
pub fn xor_words(lhs: Word, rhs: Word) -> Word {
    [(lhs[0] ^ rhs[0]) & 0x0f, (lhs[1] ^ rhs[1]) & 0x0f]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_is_self_inverse() {
        let a: Block = [[0x1, 0xf], [0x7, 0x0]];
        let b: Block = [[0xa, 0x3], [0x7, 0xc]];
        let c = xor(&a, &b);
        assert_eq!(c, [[0xb, 0xc], [0x0, 0xc]]);
        assert_eq!(xor(&c, &b), a);
    }

    #[test]
    fn word_xor() {
        assert_eq!(xor_words([0xa, 0x7], [0x3, 0xb]), [0x9, 0xc]);
    }
}
