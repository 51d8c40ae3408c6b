use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use mini_aes_core::{block_from_u16, decrypt_block, encrypt_block, expand_key, Key, Trace};

fn bench_key_schedule(c: &mut Criterion) {
    let key = Key::from(0xa73b);
    let mut group = c.benchmark_group("key_schedule");
    group.bench_function("expand_key_muted", |b| {
        b.iter(|| expand_key(&key, &mut Trace::muted()));
    });
    group.bench_function("expand_key_traced", |b| {
        b.iter(|| expand_key(&key, &mut Trace::new()));
    });
    group.finish();
}

fn bench_blocks(c: &mut Criterion) {
    let round_keys = expand_key(&Key::from(0xa73b), &mut Trace::muted());
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let block = block_from_u16(rng.next_u32() as u16);

    let mut group = c.benchmark_group("block");
    group.bench_function("encrypt_muted", |b| {
        b.iter(|| encrypt_block(&block, &round_keys, &mut Trace::muted()));
    });
    group.bench_function("decrypt_muted", |b| {
        b.iter(|| decrypt_block(&block, &round_keys, &mut Trace::muted()));
    });
    group.bench_function("encrypt_traced", |b| {
        b.iter(|| encrypt_block(&block, &round_keys, &mut Trace::new()));
    });
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_blocks);
criterion_main!(benches);
