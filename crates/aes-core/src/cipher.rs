//! AES-128 key schedule and the per-key cipher context.

use crate::block::Block;
use crate::key::{Aes128Key, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

const ROUNDS: usize = 10;
const RCON: [u8; ROUNDS] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut words = [[0u8; 4]; 4 * (ROUNDS + 1)];
    for (word, chunk) in words.iter_mut().zip(key.0.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in 4..words.len() {
        let mut temp = words[i - 1];
        if i % 4 == 0 {
            temp.rotate_left(1);
            temp.iter_mut().for_each(|b| *b = sbox(*b));
            temp[0] ^= RCON[i / 4 - 1];
        }
        for (t, prev) in temp.iter_mut().zip(words[i - 4]) {
            *t ^= prev;
        }
        words[i] = temp;
    }

    let mut round_keys = [[0u8; 16]; ROUNDS + 1];
    for (round_key, group) in round_keys.iter_mut().zip(words.chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(group) {
            dst.copy_from_slice(word);
        }
    }
    RoundKeys(round_keys)
}

/// AES-128 cipher context: an expanded key ready to process blocks.
///
/// The context is a plain value; callers that want per-call isolation simply
/// build a fresh one and drop it afterwards.
#[derive(Clone)]
pub struct Aes128 {
    round_keys: RoundKeys,
}

impl Aes128 {
    /// Runs the key schedule for `key`.
    pub fn new(key: &Aes128Key) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// Encrypts one block in place.
    pub fn encrypt_block(&self, state: &mut Block) {
        let rk = &self.round_keys;
        add_round_key(state, rk.get(0));
        for round in 1..ROUNDS {
            sub_bytes(state);
            shift_rows(state);
            mix_columns(state);
            add_round_key(state, rk.get(round));
        }
        sub_bytes(state);
        shift_rows(state);
        add_round_key(state, rk.get(ROUNDS));
    }

    /// Decrypts one block in place.
    pub fn decrypt_block(&self, state: &mut Block) {
        let rk = &self.round_keys;
        add_round_key(state, rk.get(ROUNDS));
        for round in (1..ROUNDS).rev() {
            inv_shift_rows(state);
            inv_sub_bytes(state);
            add_round_key(state, rk.get(round));
            inv_mix_columns(state);
        }
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, rk.get(0));
    }
}
