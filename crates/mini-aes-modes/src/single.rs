//! One-block operations on exactly four hex digits.

use mini_aes_core::{decrypt_block, encrypt_block, expand_key, matrix_to_hex, Error, Field, Trace};

use crate::message::{parse_field, parse_key};
use crate::outcome::Traced;

/// Encrypts one block of plaintext.
pub fn encrypt(plaintext: &str, key: &str) -> Traced<String> {
    let mut trace = Trace::new();
    let output = run(plaintext, key, true, &mut trace);
    Traced::finish(output, trace)
}

/// Decrypts one block of ciphertext.
pub fn decrypt(ciphertext: &str, key: &str) -> Traced<String> {
    let mut trace = Trace::new();
    let output = run(ciphertext, key, false, &mut trace);
    Traced::finish(output, trace)
}

fn run(input: &str, key: &str, encrypt: bool, trace: &mut Trace) -> Result<String, Error> {
    let block = parse_field(input, Field::Block(0))?;
    let key = parse_key(key)?;
    let round_keys = expand_key(&key, trace);
    trace.blank();
    let result = if encrypt {
        encrypt_block(&block, &round_keys, trace)
    } else {
        decrypt_block(&block, &round_keys, trace)
    };
    Ok(matrix_to_hex(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_aes_core::{ErrorKind, FormatError};

    #[test]
    fn known_vector_round_trips() {
        let enc = encrypt("6F6B", "A73B");
        assert_eq!(enc.value().map(String::as_str), Some("683C"));
        let dec = decrypt("683C", "A73B");
        assert_eq!(dec.into_result(), Ok("6F6B".to_string()));
    }

    #[test]
    fn extremes_round_trip() {
        for (plain, key) in [("0000", "0000"), ("FFFF", "FFFF"), ("2D3B", "1A5F")] {
            let ct = encrypt(plain, key).into_result().unwrap();
            assert_eq!(decrypt(&ct, key).into_result().unwrap(), plain);
        }
    }

    #[test]
    fn lowercase_input_gives_uppercase_output() {
        assert_eq!(encrypt("6f6b", "a73b").into_result().unwrap(), "683C");
    }

    #[test]
    fn short_block_is_a_format_error() {
        let traced = encrypt("6F6", "A73B");
        let err = traced.error().unwrap();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(
            *err,
            Error::format(Field::Block(0), FormatError::Length { found: 3 })
        );
        assert_eq!(traced.trace.len(), 1);
    }

    #[test]
    fn bad_key_is_a_format_error() {
        let err = decrypt("683C", "A7ZB").into_result().unwrap_err();
        assert!(matches!(err, Error::Format { field: Field::Key, .. }));
    }

    #[test]
    fn trace_includes_key_schedule_and_rounds() {
        let traced = encrypt("6F6B", "A73B");
        let lines = traced.trace.lines();
        assert_eq!(lines.first().map(String::as_str), Some("--- key expansion ---"));
        assert!(lines.iter().any(|l| l == "round 3 (final)"));
        assert_eq!(lines.last().map(String::as_str), Some("--- end encryption ---"));
    }
}
