//! The 4-bit substitution box and its inverse.

/// Forward substitution table.
pub const S_BOX: [u8; 16] = [
    0x9, 0x4, 0xa, 0xb, 0xd, 0x1, 0x8, 0x5, 0x6, 0x2, 0x0, 0x3, 0xc, 0xe, 0xf, 0x7,
];

/// Inverse substitution table; `INV_S_BOX[S_BOX[x]] == x`.
pub const INV_S_BOX: [u8; 16] = [
    0xa, 0x5, 0x9, 0xb, 0x1, 0x7, 0x8, 0xf, 0x6, 0x0, 0x2, 0x3, 0xc, 0x4, 0xd, 0xe,
];

/// Substitutes a nibble through [`S_BOX`].
#[inline]
pub fn sbox(nibble: u8) -> u8 {
    S_BOX[usize::from(nibble & 0x0f)]
}

/// Substitutes a nibble through [`INV_S_BOX`].
#[inline]
pub fn inv_sbox(nibble: u8) -> u8 {
    INV_S_BOX[usize::from(nibble & 0x0f)]
}
