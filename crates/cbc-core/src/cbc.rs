//! AES-128 in cipher block chaining mode over whole, block-aligned buffers.

use aes_core::{xor_in_place, Aes128, Aes128Key, Block, BLOCK_SIZE};

use crate::error::{Error, Result};

/// IV used by every exchange unless the session draws a random one.
pub const FIXED_IV: Block = [
    0xff, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];

fn context(key: &[u8]) -> Result<Aes128> {
    let key = Aes128Key::try_from(key)?;
    Ok(Aes128::new(&key))
}

fn check_aligned(buf: &[u8]) -> Result<()> {
    if buf.is_empty() || buf.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidInput { len: buf.len() });
    }
    Ok(())
}

/// Encrypts a padded buffer. The output has the same length as the input.
///
/// # Errors
///
/// [`Error::CryptoInit`] if `key` is not 16 bytes, [`Error::InvalidInput`] if
/// `plaintext` is empty or not a multiple of 16 bytes.
pub fn encrypt(plaintext: &[u8], key: &[u8], iv: &Block) -> Result<Vec<u8>> {
    let aes = context(key)?;
    check_aligned(plaintext)?;

    let mut out = plaintext.to_vec();
    let mut chain = *iv;
    for chunk in out.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        xor_in_place(&mut block, &chain);
        aes.encrypt_block(&mut block);
        chunk.copy_from_slice(&block);
        chain = block;
    }
    Ok(out)
}

/// Decrypts a ciphertext back into its padded buffer.
///
/// # Errors
///
/// Same conditions as [`encrypt`].
pub fn decrypt(ciphertext: &[u8], key: &[u8], iv: &Block) -> Result<Vec<u8>> {
    let aes = context(key)?;
    check_aligned(ciphertext)?;

    let mut out = ciphertext.to_vec();
    let mut chain = *iv;
    for chunk in out.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        let next = block;
        aes.decrypt_block(&mut block);
        xor_in_place(&mut block, &chain);
        chunk.copy_from_slice(&block);
        chain = next;
    }
    Ok(out)
}
