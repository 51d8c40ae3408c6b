//! Electronic codebook mode: every block enciphered independently.

use mini_aes_core::{
    decrypt_block, encrypt_block, expand_key, matrix_to_hex, Error, Trace, BLOCK_HEX_LEN,
};

use crate::message::{check_alignment, parse_blocks, parse_key};
use crate::outcome::Traced;

/// Encrypts a block-aligned hex message.
pub fn encrypt(plaintext: &str, key: &str) -> Traced<String> {
    let mut trace = Trace::new();
    let output = run(plaintext, key, true, &mut trace);
    Traced::finish(output, trace)
}

/// Decrypts a block-aligned hex message.
pub fn decrypt(ciphertext: &str, key: &str) -> Traced<String> {
    let mut trace = Trace::new();
    let output = run(ciphertext, key, false, &mut trace);
    Traced::finish(output, trace)
}

fn run(text: &str, key: &str, encrypt: bool, trace: &mut Trace) -> Result<String, Error> {
    check_alignment(text, BLOCK_HEX_LEN)?;
    let key = parse_key(key)?;
    let blocks = parse_blocks(text.as_bytes())?;
    trace.record(format_args!(
        "ECB {}: {} block(s)",
        if encrypt { "encrypt" } else { "decrypt" },
        blocks.len()
    ));

    let round_keys = expand_key(&key, trace);
    let mut out = String::with_capacity(text.len());
    for (index, block) in blocks.iter().enumerate() {
        trace.blank();
        trace.record(format_args!("=== block {index}: {} ===", matrix_to_hex(block)));
        let result = if encrypt {
            encrypt_block(block, &round_keys, trace)
        } else {
            decrypt_block(block, &round_keys, trace)
        };
        out.push_str(&matrix_to_hex(&result));
    }
    trace.blank();
    trace.record(format_args!("ECB result: {out}"));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::single;
    use mini_aes_core::{ErrorKind, Field};

    #[test]
    fn blocks_are_independent() {
        let ct = encrypt("6F6B2D3B", "A73B").into_result().unwrap();
        assert_eq!(ct, "683C80C9");
        assert_eq!(
            &ct[..4],
            single::encrypt("6F6B", "A73B").into_result().unwrap()
        );
        assert_eq!(decrypt(&ct, "A73B").into_result().unwrap(), "6F6B2D3B");
    }

    #[test]
    fn repeated_plaintext_repeats_ciphertext() {
        let ct = encrypt("6F6B6F6B", "A73B").into_result().unwrap();
        assert_eq!(ct.len(), 8);
        assert_eq!(ct[..4], ct[4..]);
    }

    #[test]
    fn misaligned_input_is_rejected() {
        let err = encrypt("6F6B2", "A73B").into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Alignment);
        assert_eq!(err, Error::Misaligned { len: 5 });
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = encrypt("", "A73B").into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Alignment);
        let err = decrypt("", "A73B").into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Alignment);
    }

    #[test]
    fn bad_block_aborts_with_its_index() {
        let traced = encrypt("6F6B2D3B12G4", "A73B");
        assert!(matches!(
            traced.error(),
            Some(Error::Format {
                field: Field::Block(2),
                ..
            })
        ));
        assert!(traced.value().is_none());
    }

    #[test]
    fn key_schedule_runs_once() {
        let traced = encrypt("6F6B2D3B6F6B", "A73B");
        let expansions = traced
            .trace
            .lines()
            .iter()
            .filter(|l| l.as_str() == "--- key expansion ---")
            .count();
        assert_eq!(expansions, 1);
    }
}
