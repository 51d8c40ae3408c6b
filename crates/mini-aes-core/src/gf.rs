//! Arithmetic in GF(2^4) modulo `x^4 + x + 1`.

/// Reduction applied when a shift carries out of bit 3 (`x^4 = x + 1`).
const REDUCTION: u8 = 0x3;

/// Multiplies two nibbles in GF(2^4).
///
/// Inputs are masked to their low four bits, so the function is total over
/// every `u8` pair and always returns a nibble.
pub fn gf_multiply(mut a: u8, mut b: u8) -> u8 {
    a &= 0x0f;
    b &= 0x0f;
    let mut product = 0u8;
    for _ in 0..4 {
        if b & 1 != 0 {
            product ^= a;
        }
        let hi_bit_set = a & 0x08;
        a = (a << 1) & 0x0f;
        if hi_bit_set != 0 {
            a ^= REDUCTION;
        }
        b >>= 1;
    }
    product & 0x0f
}
