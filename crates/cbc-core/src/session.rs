//! End-to-end exchange: key generation, padding, CBC encryption and recovery.

use aes_core::{Aes128Key, Block, BLOCK_SIZE};
use log::{debug, warn};
use rand::{CryptoRng, RngCore};

use crate::cbc::{self, FIXED_IV};
use crate::error::Result;
use crate::keygen::generate_aes128;
use crate::padding::{pad_within, unpad, PaddingCheck};

/// Working buffer size, padding included.
pub const DEFAULT_CAPACITY: usize = 64;

/// Where the IV of each exchange comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IvPolicy {
    /// Always [`FIXED_IV`]. Identical messages under one key encrypt identically.
    #[default]
    Fixed,
    /// A fresh IV per seal, drawn from the session RNG and kept in [`Sealed`].
    Random,
}

/// Knobs for a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum padded length in bytes.
    pub capacity: usize,
    /// IV selection.
    pub iv: IvPolicy,
    /// Padding validation applied on recovery.
    pub padding: PaddingCheck,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            iv: IvPolicy::default(),
            padding: PaddingCheck::default(),
        }
    }
}

/// Everything needed to recover a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sealed {
    /// Key the message was encrypted under.
    pub key: Aes128Key,
    /// IV of the first CBC block.
    pub iv: Block,
    /// Encrypted, padded message.
    pub ciphertext: Vec<u8>,
}

/// Outcome of [`Session::round_trip`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// The encrypted side of the exchange.
    pub sealed: Sealed,
    /// Recovered message, or why it could not be recovered.
    pub recovered: Result<Vec<u8>>,
}

impl Exchange {
    /// True when the recovered bytes equal `message`.
    pub fn matches(&self, message: &[u8]) -> bool {
        matches!(&self.recovered, Ok(m) if m == message)
    }
}

/// Drives exchanges with a caller-owned RNG.
pub struct Session<R: RngCore + CryptoRng> {
    rng: R,
    config: SessionConfig,
}

impl<R: RngCore + CryptoRng> Session<R> {
    /// Creates a session with the default configuration.
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, SessionConfig::default())
    }

    /// Creates a session with explicit configuration.
    pub fn with_config(rng: R, config: SessionConfig) -> Self {
        Self { rng, config }
    }

    /// Generates a fresh printable key and encrypts `message` under it.
    pub fn seal(&mut self, message: &[u8]) -> Result<Sealed> {
        let key = generate_aes128(&mut self.rng);
        self.seal_with_key(message, key.as_bytes())
    }

    /// Encrypts `message` under caller-supplied key material.
    pub fn seal_with_key(&mut self, message: &[u8], key: &[u8]) -> Result<Sealed> {
        let key = Aes128Key::try_from(key)?;
        let padded = pad_within(message, BLOCK_SIZE, self.config.capacity)?;
        let iv = self.next_iv();
        let ciphertext = cbc::encrypt(&padded, key.as_bytes(), &iv)?;
        debug!(
            "sealed {} message bytes into {} ciphertext bytes",
            message.len(),
            ciphertext.len()
        );
        Ok(Sealed {
            key,
            iv,
            ciphertext,
        })
    }

    /// Decrypts and unpads a sealed message.
    pub fn open(&self, sealed: &Sealed) -> Result<Vec<u8>> {
        open_with(
            &sealed.ciphertext,
            sealed.key.as_bytes(),
            &sealed.iv,
            self.config.padding,
        )
    }

    /// Seals `message` and immediately recovers it.
    ///
    /// Only sealing errors (oversized message, bad key) are returned as `Err`;
    /// a recovery failure is reported through [`Exchange::recovered`].
    pub fn round_trip(&mut self, message: &[u8]) -> Result<Exchange> {
        let sealed = self.seal(message)?;
        let recovered = self.open(&sealed);
        Ok(Exchange { sealed, recovered })
    }

    fn next_iv(&mut self) -> Block {
        match self.config.iv {
            IvPolicy::Fixed => FIXED_IV,
            IvPolicy::Random => {
                let mut iv = [0u8; BLOCK_SIZE];
                self.rng.fill_bytes(&mut iv);
                iv
            }
        }
    }
}

/// Decrypts `ciphertext` and strips its padding.
pub fn open_with(
    ciphertext: &[u8],
    key: &[u8],
    iv: &Block,
    check: PaddingCheck,
) -> Result<Vec<u8>> {
    let padded = cbc::decrypt(ciphertext, key, iv)?;
    match unpad(&padded, BLOCK_SIZE, check) {
        Ok(message) => Ok(message.to_vec()),
        Err(err) => {
            warn!("padding check failed on {} recovered bytes", padded.len());
            Err(err)
        }
    }
}
