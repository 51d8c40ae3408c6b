//! Encrypts a repeated two-block message under ECB and CBC and decrypts it back.

use mini_aes_modes::{cbc, ecb, single};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn main() {
    let key = "A73B";
    let message = "6F6B6F6B";

    let block = single::encrypt("6F6B", key);
    for line in &block.trace {
        println!("{line}");
    }
    let first = block.into_result().expect("valid block and key");

    let ecb_ct = ecb::encrypt(message, key).into_result().expect("aligned message");
    assert_eq!(&ecb_ct[..4], first);
    assert_eq!(ecb_ct[..4], ecb_ct[4..]);

    // Deterministic seed for reproducibility in the example.
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let cbc_ct = cbc::encrypt_with_rng(message, key, None, &mut rng)
        .into_result()
        .expect("aligned message");
    assert_ne!(cbc_ct[4..8], cbc_ct[8..12]);
    let recovered = cbc::decrypt(&cbc_ct, key).into_result().expect("IV + blocks");
    assert_eq!(recovered, message);

    println!("ECB: {ecb_ct}");
    println!("CBC: {cbc_ct}");
}
