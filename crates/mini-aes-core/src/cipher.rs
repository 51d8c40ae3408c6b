//! Mini-AES key schedule and block encryption/decryption.

use crate::block::{xor_words, Block, Word};
use crate::codec::{matrix_to_hex, word_to_hex};
use crate::key::{Key, RoundKeys, NUM_ROUNDS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_nibbles, mix_columns, shift_rows,
    sub_nibbles,
};
use crate::sbox::sbox;
use crate::trace::Trace;

/// Words produced by the key schedule (two per round key).
const NUM_WORDS: usize = 2 * (NUM_ROUNDS + 1);

/// Round constants; `RCON[r - 1]` is mixed into the first word of round key `r`.
const RCON: [Word; NUM_ROUNDS] = [[0x1, 0x0], [0x2, 0x0], [0x4, 0x0]];

fn rot_word(word: Word) -> Word {
    [word[1], word[0]]
}

fn sub_word(word: Word) -> Word {
    [sbox(word[0]), sbox(word[1])]
}

/// Expands a 16-bit key into `NUM_ROUNDS + 1` round keys, logging every step.
pub fn expand_key(key: &Key, trace: &mut Trace) -> RoundKeys {
    let [k0, k1, k2, k3] = key.nibbles();
    let mut w: [Word; NUM_WORDS] = [[0; 2]; NUM_WORDS];
    w[0] = [k0, k1];
    w[1] = [k2, k3];

    let logging = !trace.is_muted();
    if logging {
        trace.record(format_args!("--- key expansion ---"));
        trace.record(format_args!("key: {key}"));
        trace.record(format_args!("W[0] = {}", word_to_hex(w[0])));
        trace.record(format_args!("W[1] = {}", word_to_hex(w[1])));
    }

    for i in 2..NUM_WORDS {
        let prev = w[i - 1];
        let temp = if i % 2 == 0 {
            let rotated = rot_word(prev);
            let substituted = sub_word(rotated);
            let rcon = RCON[i / 2 - 1];
            let mixed = xor_words(substituted, rcon);
            if logging {
                trace.record(format_args!("g(W[{}]) for W[{i}]:", i - 1));
                trace.record(format_args!(
                    "  RotWord {} -> {}",
                    word_to_hex(prev),
                    word_to_hex(rotated)
                ));
                trace.record(format_args!(
                    "  SubWord {} -> {}",
                    word_to_hex(rotated),
                    word_to_hex(substituted)
                ));
                trace.record(format_args!(
                    "  XOR RCON[{}] {}: {} -> {}",
                    i / 2,
                    word_to_hex(rcon),
                    word_to_hex(substituted),
                    word_to_hex(mixed)
                ));
            }
            mixed
        } else {
            prev
        };
        w[i] = xor_words(w[i - 2], temp);
        if logging {
            trace.record(format_args!(
                "W[{i}] = W[{}] ^ temp = {} ^ {} = {}",
                i - 2,
                word_to_hex(w[i - 2]),
                word_to_hex(temp),
                word_to_hex(w[i])
            ));
        }
    }

    let mut round_keys = [[[0u8; 2]; 2]; NUM_ROUNDS + 1];
    for (round, rk) in round_keys.iter_mut().enumerate() {
        let (a, b) = (w[2 * round], w[2 * round + 1]);
        *rk = [[a[0], b[0]], [a[1], b[1]]];
        if logging {
            trace.record(format_args!(
                "RK{round} = W[{}] || W[{}] = {}",
                2 * round,
                2 * round + 1,
                matrix_to_hex(rk)
            ));
        }
    }
    if logging {
        trace.record(format_args!("--- end key expansion ---"));
    }

    RoundKeys(round_keys)
}

fn step(trace: &mut Trace, name: &str, state: &mut Block, op: impl FnOnce(&mut Block)) {
    if trace.is_muted() {
        op(state);
        return;
    }
    let before = matrix_to_hex(state);
    op(state);
    trace.record(format_args!("  {name}: {before} -> {}", matrix_to_hex(state)));
}

fn round_key_step(
    trace: &mut Trace,
    name: &str,
    state: &mut Block,
    keys: &RoundKeys,
    round: usize,
) {
    let rk = keys.get(round);
    if !trace.is_muted() {
        trace.record(format_args!("  round key RK{round}: {}", matrix_to_hex(rk)));
    }
    step(trace, name, state, |s| add_round_key(s, rk));
}

fn log_state(trace: &mut Trace, label: &str, state: &Block) {
    if !trace.is_muted() {
        trace.record(format_args!(
            "{label}: {} (matrix [{:X} {:X}] [{:X} {:X}])",
            matrix_to_hex(state),
            state[0][0],
            state[0][1],
            state[1][0],
            state[1][1]
        ));
    }
}

/// Encrypts a single block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys, trace: &mut Trace) -> Block {
    let mut state = *block;

    trace.record(format_args!("--- encryption ---"));
    log_state(trace, "plaintext", &state);

    trace.record(format_args!("round 0"));
    round_key_step(trace, "AddRoundKey", &mut state, round_keys, 0);

    for round in 1..NUM_ROUNDS {
        trace.record(format_args!("round {round}"));
        step(trace, "SubNibbles", &mut state, sub_nibbles);
        step(trace, "ShiftRows", &mut state, shift_rows);
        step(trace, "MixColumns", &mut state, mix_columns);
        round_key_step(trace, "AddRoundKey", &mut state, round_keys, round);
    }

    trace.record(format_args!("round {NUM_ROUNDS} (final)"));
    step(trace, "SubNibbles", &mut state, sub_nibbles);
    step(trace, "ShiftRows", &mut state, shift_rows);
    round_key_step(trace, "AddRoundKey", &mut state, round_keys, NUM_ROUNDS);

    log_state(trace, "ciphertext", &state);
    trace.record(format_args!("--- end encryption ---"));
    state
}

/// Decrypts a single block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys, trace: &mut Trace) -> Block {
    let mut state = *block;

    trace.record(format_args!("--- decryption ---"));
    log_state(trace, "ciphertext", &state);

    trace.record(format_args!("inverse round {NUM_ROUNDS}"));
    round_key_step(trace, "AddRoundKey", &mut state, round_keys, NUM_ROUNDS);
    step(trace, "InvShiftRows", &mut state, inv_shift_rows);
    step(trace, "InvSubNibbles", &mut state, inv_sub_nibbles);

    for round in (1..NUM_ROUNDS).rev() {
        trace.record(format_args!("inverse round {round}"));
        round_key_step(trace, "AddRoundKey", &mut state, round_keys, round);
        step(trace, "InvMixColumns", &mut state, inv_mix_columns);
        step(trace, "InvShiftRows", &mut state, inv_shift_rows);
        step(trace, "InvSubNibbles", &mut state, inv_sub_nibbles);
    }

    trace.record(format_args!("inverse round 0"));
    round_key_step(trace, "AddRoundKey", &mut state, round_keys, 0);

    log_state(trace, "plaintext", &state);
    trace.record(format_args!("--- end decryption ---"));
    state
}
