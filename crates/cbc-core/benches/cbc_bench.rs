use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use cbc_core::{decrypt, encrypt, generate_aes128, pad, Session, BLOCK_SIZE, FIXED_IV};

fn bench_cbc(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let key = generate_aes128(&mut rng);
    let mut message = [0u8; 47];
    rng.fill_bytes(&mut message);
    let padded = pad(&message, BLOCK_SIZE);
    let ciphertext = encrypt(&padded, key.as_bytes(), &FIXED_IV).unwrap();

    let mut group = c.benchmark_group("cbc");
    group.bench_function("encrypt_64", |b| {
        b.iter(|| encrypt(&padded, key.as_bytes(), &FIXED_IV).unwrap());
    });
    group.bench_function("decrypt_64", |b| {
        b.iter(|| decrypt(&ciphertext, key.as_bytes(), &FIXED_IV).unwrap());
    });
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut session = Session::new(ChaCha20Rng::from_seed([4u8; 32]));
    let mut group = c.benchmark_group("session");
    group.sample_size(50);
    group.bench_function("round_trip_hello", |b| {
        b.iter(|| session.round_trip(b"HELLO").unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_cbc, bench_session);
criterion_main!(benches);
