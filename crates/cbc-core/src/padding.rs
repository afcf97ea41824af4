//! Length-encoding block padding.
//!
//! Every message gains between 1 and `block_size` bytes, each holding the
//! number of bytes added, so a block-aligned message gains a whole block and
//! the padding can always be removed unambiguously.

use crate::error::{Error, Result};

/// How much of the trailing pad run [`unpad`] inspects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaddingCheck {
    /// Only the final length byte is range checked.
    Lenient,
    /// Every pad byte must equal the length byte.
    #[default]
    Strict,
}

/// Padded length for a `message_len`-byte message.
///
/// # Panics
///
/// If `block_size` is zero or does not fit in a pad byte.
#[inline]
pub fn padded_len(message_len: usize, block_size: usize) -> usize {
    assert!(
        (1..=255).contains(&block_size),
        "block size must be in 1..=255, got {block_size}"
    );
    (message_len / block_size + 1) * block_size
}

/// Pads `message` to the next multiple of `block_size`.
///
/// # Panics
///
/// Same conditions as [`padded_len`].
pub fn pad(message: &[u8], block_size: usize) -> Vec<u8> {
    let total = padded_len(message.len(), block_size);
    let pad_value = (total - message.len()) as u8;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(message);
    out.resize(total, pad_value);
    debug_assert_eq!(out.len() % block_size, 0);
    out
}

/// Pads `message`, refusing to exceed a `capacity`-byte working buffer.
///
/// # Panics
///
/// Same conditions as [`padded_len`].
pub fn pad_within(message: &[u8], block_size: usize, capacity: usize) -> Result<Vec<u8>> {
    if padded_len(message.len(), block_size) > capacity {
        return Err(Error::MessageTooLarge {
            len: message.len(),
            capacity,
        });
    }
    Ok(pad(message, block_size))
}

/// Strips the padding added by [`pad`], returning the original message.
pub fn unpad(padded: &[u8], block_size: usize, check: PaddingCheck) -> Result<&[u8]> {
    let &last = padded.last().ok_or(Error::Padding)?;
    let pad_len = usize::from(last);
    if pad_len == 0 || pad_len > block_size || pad_len > padded.len() {
        return Err(Error::Padding);
    }

    let (message, tail) = padded.split_at(padded.len() - pad_len);
    if check == PaddingCheck::Strict {
        // Fold the whole run so timing does not depend on where it breaks.
        let diff = tail.iter().fold(0u8, |acc, &b| acc | (b ^ last));
        if diff != 0 {
            return Err(Error::Padding);
        }
    }
    Ok(message)
}
