//! Random printable keys.

use aes_core::{Aes128Key, KEY_SIZE};
use rand::{CryptoRng, Rng, RngCore};

/// Characters a generated key is drawn from: every printable ASCII glyph,
/// space excluded, so a key can be shown and typed back verbatim.
pub const KEY_ALPHABET: &[u8; 94] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Draws keys from a caller-supplied RNG.
pub struct KeyGenerator<R: RngCore + CryptoRng> {
    rng: R,
}

impl<R: RngCore + CryptoRng> KeyGenerator<R> {
    /// Wraps `rng`. Seeding it is the caller's job.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns `length` bytes, each picked uniformly from [`KEY_ALPHABET`].
    pub fn generate_key(&mut self, length: usize) -> Vec<u8> {
        generate_key(&mut self.rng, length)
    }

    /// Returns a printable AES-128 key.
    pub fn generate_aes128(&mut self) -> Aes128Key {
        generate_aes128(&mut self.rng)
    }
}

/// Free-function form of [`KeyGenerator::generate_key`].
pub fn generate_key<R: RngCore + CryptoRng>(rng: &mut R, length: usize) -> Vec<u8> {
    let mut key = vec![0u8; length];
    fill_from_alphabet(rng, &mut key);
    key
}

/// Free-function form of [`KeyGenerator::generate_aes128`].
pub fn generate_aes128<R: RngCore + CryptoRng>(rng: &mut R) -> Aes128Key {
    let mut key = [0u8; KEY_SIZE];
    fill_from_alphabet(rng, &mut key);
    Aes128Key::from(key)
}

fn fill_from_alphabet<R: RngCore + CryptoRng>(rng: &mut R, out: &mut [u8]) {
    for byte in out.iter_mut() {
        *byte = KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn alphabet_is_printable_ascii_without_space() {
        let mut sorted = KEY_ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 94);
        assert_eq!(sorted, (b'!'..=b'~').collect::<Vec<u8>>());
    }

    #[test]
    fn generates_requested_length_from_alphabet() {
        let mut gen = KeyGenerator::new(ChaCha20Rng::from_seed([7u8; 32]));
        for length in [0, 1, 16, 64] {
            let key = gen.generate_key(length);
            assert_eq!(key.len(), length);
            assert!(key.iter().all(|b| KEY_ALPHABET.contains(b)));
        }
    }

    #[test]
    fn successive_keys_differ() {
        let mut gen = KeyGenerator::new(ChaCha20Rng::from_seed([9u8; 32]));
        let first = gen.generate_aes128();
        let second = gen.generate_aes128();
        assert_ne!(first, second);
        assert!(first.as_bytes().iter().all(|b| KEY_ALPHABET.contains(b)));
    }

    #[test]
    fn aes_key_and_raw_key_draw_identically() {
        let raw = generate_key(&mut ChaCha20Rng::from_seed([5u8; 32]), KEY_SIZE);
        let aes = generate_aes128(&mut ChaCha20Rng::from_seed([5u8; 32]));
        assert_eq!(&aes.as_bytes()[..], &raw[..]);
    }

    #[test]
    fn same_seed_same_key() {
        let a = KeyGenerator::new(ChaCha20Rng::from_seed([3u8; 32])).generate_key(16);
        let b = KeyGenerator::new(ChaCha20Rng::from_seed([3u8; 32])).generate_key(16);
        assert_eq!(a, b);
    }

    #[test]
    fn covers_the_alphabet_over_many_draws() {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        let drawn = generate_key(&mut rng, 20_000);
        let mut seen = [false; 256];
        drawn.iter().for_each(|&b| seen[b as usize] = true);
        assert!(KEY_ALPHABET.iter().all(|&b| seen[b as usize]));
    }
}
