use cbc_core::{
    decrypt, encrypt, open_with, pad, unpad, Error, IvPolicy, PaddingCheck, Session,
    SessionConfig, BLOCK_SIZE, FIXED_IV, KEY_ALPHABET,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn seeded(seed: u64) -> ChaCha20Rng {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    ChaCha20Rng::from_seed(bytes)
}

#[test]
fn every_length_up_to_capacity_round_trips() {
    let mut rng = seeded(1);
    for len in 0..=63 {
        for _ in 0..4 {
            let mut message = vec![0u8; len];
            rng.fill_bytes(&mut message);
            let mut key = [0u8; 16];
            rng.fill_bytes(&mut key);

            let padded = pad(&message, BLOCK_SIZE);
            let ct = encrypt(&padded, &key, &FIXED_IV).unwrap();
            assert_eq!(ct.len(), padded.len());
            let recovered = decrypt(&ct, &key, &FIXED_IV).unwrap();
            assert_eq!(
                unpad(&recovered, BLOCK_SIZE, PaddingCheck::Strict).unwrap(),
                &message[..]
            );
        }
    }
}

#[test]
fn session_round_trips_text_lines() {
    let mut session = Session::new(seeded(2));
    for line in ["", "HELLO", "Привет, мир", "exactly sixteen!", &"z".repeat(63)] {
        let exchange = session.round_trip(line.as_bytes()).unwrap();
        assert!(exchange.matches(line.as_bytes()), "line {line:?}");
        assert_eq!(exchange.sealed.ciphertext.len() % BLOCK_SIZE, 0);
    }
}

#[test]
fn session_keys_are_printable_and_fresh() {
    let mut session = Session::new(seeded(3));
    let a = session.seal(b"message").unwrap();
    let b = session.seal(b"message").unwrap();
    assert_ne!(a.key, b.key);
    assert_ne!(a.ciphertext, b.ciphertext);
    for key in [a.key, b.key] {
        assert!(key.as_bytes().iter().all(|byte| KEY_ALPHABET.contains(byte)));
    }
}

fn tamper_failures(check: PaddingCheck, trials: u64) -> usize {
    let config = SessionConfig {
        padding: check,
        ..SessionConfig::default()
    };
    let mut failures = 0;
    for seed in 0..trials {
        let mut rng = seeded(1_000 + seed);
        let len: usize = rng.gen_range(0..=47);
        let message: Vec<u8> = (0..len).map(|_| rng.gen_range(b' '..=b'~')).collect();
        let mut session = Session::with_config(rng, config);
        let mut sealed = session.seal(&message).unwrap();
        *sealed.ciphertext.last_mut().unwrap() ^= 0x01;
        match session.open(&sealed) {
            Err(Error::Padding) => failures += 1,
            Err(other) => panic!("unexpected error {other}"),
            Ok(bytes) => assert_ne!(bytes, message),
        }
    }
    failures
}

// Flipping the last ciphertext byte scrambles the final plaintext block, so the
// padding check catches it most of the time. This is not authentication.
#[test]
fn tampering_usually_breaks_padding() {
    assert!(tamper_failures(PaddingCheck::Strict, 200) >= 190);
    assert!(tamper_failures(PaddingCheck::Lenient, 200) >= 160);
}

#[test]
fn random_iv_exchange_needs_its_iv() {
    const MESSAGE: &[u8] = b"per-message iv, two blocks";
    let mut session = Session::with_config(
        seeded(4),
        SessionConfig {
            iv: IvPolicy::Random,
            ..SessionConfig::default()
        },
    );
    let sealed = session.seal(MESSAGE).unwrap();
    assert_ne!(sealed.iv, FIXED_IV);

    let ok = open_with(
        &sealed.ciphertext,
        sealed.key.as_bytes(),
        &sealed.iv,
        PaddingCheck::Strict,
    )
    .unwrap();
    assert_eq!(ok, MESSAGE);

    // The wrong IV only garbles the first block; the padding sits in the second.
    let garbled = open_with(
        &sealed.ciphertext,
        sealed.key.as_bytes(),
        &FIXED_IV,
        PaddingCheck::Strict,
    )
    .unwrap();
    assert_ne!(garbled, MESSAGE);
    assert_eq!(garbled.len(), MESSAGE.len());
}
