//! Printable key generation, length padding and AES-128-CBC round trips.
//!
//! The pipeline is deliberately small:
//! - [`keygen`] draws 16-byte keys from a printable alphabet.
//! - [`padding`] aligns messages to the block size with a length-encoding
//!   scheme and removes it again.
//! - [`cbc`] chains [`aes_core::Aes128`] over whole buffers.
//! - [`session`] sequences the three and reports recovery failures as values.
//!
//! There is no message authentication: a tampered ciphertext is only caught
//! when it happens to corrupt the padding.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cbc;
pub mod error;
pub mod keygen;
pub mod padding;
pub mod session;

pub use aes_core::{Aes128Key, Block, BLOCK_SIZE, KEY_SIZE};
pub use cbc::{decrypt, encrypt, FIXED_IV};
pub use error::{Error, Result};
pub use keygen::{generate_aes128, generate_key, KeyGenerator, KEY_ALPHABET};
pub use padding::{pad, pad_within, padded_len, unpad, PaddingCheck};
pub use session::{
    open_with, Exchange, IvPolicy, Sealed, Session, SessionConfig, DEFAULT_CAPACITY,
};
