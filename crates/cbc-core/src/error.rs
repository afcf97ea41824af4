//! Error type shared by every stage of the workflow.

use thiserror::Error;

/// Failures produced while padding, encrypting or recovering a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The trailing pad byte (or, in strict mode, the pad run) is malformed.
    /// Usually means the wrong key was used or the ciphertext was altered.
    #[error("invalid padding")]
    Padding,

    /// The padded message would not fit the working buffer.
    #[error("message of {len} bytes does not fit a {capacity}-byte buffer once padded")]
    MessageTooLarge {
        /// Message length in bytes.
        len: usize,
        /// Buffer capacity in bytes, padding included.
        capacity: usize,
    },

    /// Key material could not initialise an AES-128 context.
    #[error("cannot initialise AES-128 with a {key_len}-byte key")]
    CryptoInit {
        /// Length of the rejected key.
        key_len: usize,
    },

    /// A cipher buffer was empty or not block aligned.
    #[error("cipher input of {len} bytes is not a positive multiple of the block size")]
    InvalidInput {
        /// Length of the rejected buffer.
        len: usize,
    },
}

impl From<aes_core::KeyLengthError> for Error {
    fn from(err: aes_core::KeyLengthError) -> Self {
        Self::CryptoInit { key_len: err.len }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
