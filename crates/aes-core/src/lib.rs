//! AES-128 block primitive for the CBC workflow.
//!
//! Provides the FIPS-197 key schedule and single-block encryption and
//! decryption behind a small context type, [`Aes128`]. Chaining modes and
//! padding live in `cbc-core`; this crate only knows about 16-byte blocks.
//!
//! The implementation favours clarity over constant-time guarantees; it should
//! not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{expand_key, Aes128};
pub use crate::key::{Aes128Key, KeyLengthError, RoundKeys, KEY_SIZE};
