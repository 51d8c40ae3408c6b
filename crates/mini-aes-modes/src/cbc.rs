//! Cipher block chaining with the IV prepended to the ciphertext.

use mini_aes_core::{
    block_from_u16, decrypt_block, encrypt_block, expand_key, matrix_to_hex, xor, Block, Error,
    Field, Trace, BLOCK_HEX_LEN,
};
use rand::RngCore;

use crate::message::{check_alignment, parse_blocks, parse_field, parse_key};
use crate::outcome::Traced;

/// Encrypts a block-aligned hex message; draws the IV from `thread_rng` when none is given.
pub fn encrypt(plaintext: &str, key: &str, iv: Option<&str>) -> Traced<String> {
    encrypt_with_rng(plaintext, key, iv, &mut rand::thread_rng())
}

/// Encrypts like [`encrypt`], drawing a missing IV from `rng`.
pub fn encrypt_with_rng<R: RngCore>(
    plaintext: &str,
    key: &str,
    iv: Option<&str>,
    rng: &mut R,
) -> Traced<String> {
    let mut trace = Trace::new();
    let output = run_encrypt(plaintext, key, iv, rng, &mut trace);
    Traced::finish(output, trace)
}

/// Decrypts `IV || C0 || C1 ...`, returning the plaintext without the IV.
pub fn decrypt(ciphertext: &str, key: &str) -> Traced<String> {
    let mut trace = Trace::new();
    let output = run_decrypt(ciphertext, key, &mut trace);
    Traced::finish(output, trace)
}

/// Draws a uniformly random IV.
pub fn random_iv<R: RngCore>(rng: &mut R) -> Block {
    block_from_u16(rng.next_u32() as u16)
}

fn run_encrypt<R: RngCore>(
    text: &str,
    key: &str,
    iv: Option<&str>,
    rng: &mut R,
    trace: &mut Trace,
) -> Result<String, Error> {
    check_alignment(text, BLOCK_HEX_LEN)?;
    let key = parse_key(key)?;
    let blocks = parse_blocks(text.as_bytes())?;
    let iv = match iv {
        Some(iv) => {
            let iv = parse_field(iv, Field::Iv)?;
            trace.record(format_args!("IV (supplied): {}", matrix_to_hex(&iv)));
            iv
        }
        None => {
            let iv = random_iv(rng);
            trace.record(format_args!("IV (generated): {}", matrix_to_hex(&iv)));
            iv
        }
    };
    trace.record(format_args!("CBC encrypt: {} block(s)", blocks.len()));

    let round_keys = expand_key(&key, trace);
    let mut out = matrix_to_hex(&iv);
    let mut chain = iv;
    for (index, block) in blocks.iter().enumerate() {
        let mixed = xor(block, &chain);
        trace.blank();
        trace.record(format_args!(
            "=== block {index}: {} ^ {} = {} ===",
            matrix_to_hex(block),
            matrix_to_hex(&chain),
            matrix_to_hex(&mixed)
        ));
        chain = encrypt_block(&mixed, &round_keys, trace);
        out.push_str(&matrix_to_hex(&chain));
    }
    trace.blank();
    trace.record(format_args!("CBC result (IV first): {out}"));
    Ok(out)
}

fn run_decrypt(text: &str, key: &str, trace: &mut Trace) -> Result<String, Error> {
    check_alignment(text, 2 * BLOCK_HEX_LEN)?;
    let key = parse_key(key)?;
    let (iv_text, body) = text.as_bytes().split_at(BLOCK_HEX_LEN);
    let iv = parse_field(iv_text, Field::Iv)?;
    let blocks = parse_blocks(body)?;
    trace.record(format_args!("IV: {}", matrix_to_hex(&iv)));
    trace.record(format_args!("CBC decrypt: {} block(s)", blocks.len()));

    let round_keys = expand_key(&key, trace);
    let mut out = String::with_capacity(body.len());
    let mut chain = iv;
    for (index, block) in blocks.iter().enumerate() {
        trace.blank();
        trace.record(format_args!("=== block {index}: {} ===", matrix_to_hex(block)));
        let decrypted = decrypt_block(block, &round_keys, trace);
        let plain = xor(&decrypted, &chain);
        trace.record(format_args!(
            "unchain: {} ^ {} = {}",
            matrix_to_hex(&decrypted),
            matrix_to_hex(&chain),
            matrix_to_hex(&plain)
        ));
        out.push_str(&matrix_to_hex(&plain));
        // Chain on the received ciphertext, not the recovered plaintext.
        chain = *block;
    }
    trace.blank();
    trace.record(format_args!("CBC result: {out}"));
    Ok(out)
}
