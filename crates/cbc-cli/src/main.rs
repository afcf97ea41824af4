//! Command-line interface for the AES-128-CBC workflow.

#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use cbc_core::{
    open_with, Block, Error as CbcError, IvPolicy, KeyGenerator, PaddingCheck, Session,
    SessionConfig, BLOCK_SIZE, DEFAULT_CAPACITY, FIXED_IV, KEY_SIZE,
};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES-128-CBC round-trip CLI.
#[derive(Parser)]
#[command(
    name = "aescbc",
    version,
    author,
    about = "Printable-key AES-128-CBC with length padding"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one line from stdin, then encrypt and recover it under a fresh key.
    Run {
        #[command(flatten)]
        opts: SessionOpts,
    },
    /// Same as `run`, with the message given on the command line.
    Demo {
        /// Message to encrypt.
        #[arg(long)]
        message: String,
        #[command(flatten)]
        opts: SessionOpts,
    },
    /// Print a random printable key.
    Keygen {
        /// Key length in characters.
        #[arg(long, default_value_t = KEY_SIZE)]
        length: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt a message under a given 16-character key and print hex.
    Encrypt {
        /// Key as 16 printable characters.
        #[arg(long)]
        key: String,
        /// Message to encrypt.
        #[arg(long)]
        message: String,
        /// IV as 32 hex characters (defaults to the fixed IV).
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
        /// Buffer capacity in bytes, padding included.
        #[arg(long, default_value_t = DEFAULT_CAPACITY)]
        capacity: usize,
    },
    /// Decrypt hex ciphertext under a given key and print the message.
    Decrypt {
        /// Key as 16 printable characters.
        #[arg(long)]
        key: String,
        /// Ciphertext as hex; whitespace between byte pairs is ignored.
        #[arg(long, value_name = "HEX")]
        ciphertext_hex: String,
        /// IV as 32 hex characters (defaults to the fixed IV).
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
        /// Only check the final pad byte.
        #[arg(long, default_value_t = false)]
        lenient_padding: bool,
    },
}

#[derive(Args, Clone, Debug)]
struct SessionOpts {
    /// Optional RNG seed for reproducibility.
    #[arg(long)]
    seed: Option<u64>,
    /// Buffer capacity in bytes, padding included.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Draw a fresh IV per message instead of the fixed one.
    #[arg(long, default_value_t = false)]
    random_iv: bool,
    /// Only check the final pad byte when recovering.
    #[arg(long, default_value_t = false)]
    lenient_padding: bool,
}

impl SessionOpts {
    fn config(&self) -> SessionConfig {
        SessionConfig {
            capacity: self.capacity,
            iv: if self.random_iv {
                IvPolicy::Random
            } else {
                IvPolicy::Fixed
            },
            padding: padding_check(self.lenient_padding),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { opts } => cmd_run(&opts),
        Commands::Demo { message, opts } => cmd_demo(&message, &opts),
        Commands::Keygen { length, seed } => cmd_keygen(length, seed),
        Commands::Encrypt {
            key,
            message,
            iv_hex,
            capacity,
        } => cmd_encrypt(&key, &message, iv_hex.as_deref(), capacity),
        Commands::Decrypt {
            key,
            ciphertext_hex,
            iv_hex,
            lenient_padding,
        } => cmd_decrypt(&key, &ciphertext_hex, iv_hex.as_deref(), lenient_padding),
    }
}

fn cmd_run(opts: &SessionOpts) -> Result<()> {
    println!("Enter a line and press Enter:");
    io::stdout().flush().context("flush stdout")?;
    let message = read_message(io::stdin().lock())?;
    round_trip(&message, opts)
}

fn cmd_demo(message: &str, opts: &SessionOpts) -> Result<()> {
    round_trip(message.trim(), opts)
}

fn round_trip(message: &str, opts: &SessionOpts) -> Result<()> {
    let config = opts.config();
    debug!("session config: {config:?}");
    let mut session = Session::with_config(seeded_rng(opts.seed), config);

    println!("{message}");
    let exchange = session
        .round_trip(message.as_bytes())
        .context("encrypt message")?;
    let sealed = &exchange.sealed;

    println!("Key: {}", String::from_utf8_lossy(sealed.key.as_bytes()));
    if config.iv == IvPolicy::Random {
        println!("IV (HEX): {}", format_hex(&sealed.iv));
    }
    println!("Encrypted (HEX):");
    println!("{}", format_hex(&sealed.ciphertext));

    match &exchange.recovered {
        Ok(bytes) => {
            println!("Decrypted (padding removed):");
            println!("{}", String::from_utf8_lossy(bytes));
        }
        Err(CbcError::Padding) => println!("Padding error!"),
        Err(err) => bail!("recovery failed: {err}"),
    }
    Ok(())
}

fn cmd_keygen(length: usize, seed: Option<u64>) -> Result<()> {
    let mut gen = KeyGenerator::new(seeded_rng(seed));
    let key = gen.generate_key(length);
    println!("{}", String::from_utf8_lossy(&key));
    Ok(())
}

fn cmd_encrypt(key: &str, message: &str, iv_hex: Option<&str>, capacity: usize) -> Result<()> {
    let iv = parse_iv(iv_hex)?;
    let padded = cbc_core::pad_within(message.as_bytes(), BLOCK_SIZE, capacity)
        .context("pad message")?;
    let ciphertext = cbc_core::encrypt(&padded, key.as_bytes(), &iv).context("encrypt")?;
    info!("encrypted {} bytes", message.len());
    println!("{}", format_hex(&ciphertext));
    Ok(())
}

fn cmd_decrypt(
    key: &str,
    ciphertext_hex: &str,
    iv_hex: Option<&str>,
    lenient_padding: bool,
) -> Result<()> {
    let iv = parse_iv(iv_hex)?;
    let ciphertext = parse_hex(ciphertext_hex).context("decode ciphertext hex")?;
    match open_with(
        &ciphertext,
        key.as_bytes(),
        &iv,
        padding_check(lenient_padding),
    ) {
        Ok(message) => println!("{}", String::from_utf8_lossy(&message)),
        Err(CbcError::Padding) => println!("Padding error!"),
        Err(err) => return Err(err).context("decrypt"),
    }
    Ok(())
}

fn padding_check(lenient: bool) -> PaddingCheck {
    if lenient {
        PaddingCheck::Lenient
    } else {
        PaddingCheck::Strict
    }
}

/// Reads one line and trims surrounding whitespace.
fn read_message(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("read stdin")?;
    if read == 0 {
        bail!("no input on stdin");
    }
    Ok(line.trim().to_owned())
}

/// Space-separated uppercase byte pairs, e.g. `0A FF 10`.
fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    hex::decode(compact).context("invalid hex")
}

fn parse_iv(iv_hex: Option<&str>) -> Result<Block> {
    let Some(text) = iv_hex else {
        return Ok(FIXED_IV);
    };
    let bytes = parse_hex(text).context("decode IV hex")?;
    if bytes.len() != BLOCK_SIZE {
        bail!("IV must be {BLOCK_SIZE} bytes (32 hex characters)");
    }
    let mut iv = [0u8; BLOCK_SIZE];
    iv.copy_from_slice(&bytes);
    Ok(iv)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_pairs() {
        assert_eq!(format_hex(&[0x0a, 0xff, 0x10]), "0A FF 10");
        assert_eq!(format_hex(&[]), "");
    }

    #[test]
    fn hex_parsing_ignores_spacing() {
        assert_eq!(parse_hex("0A FF\n10").unwrap(), vec![0x0a, 0xff, 0x10]);
        assert!(parse_hex("0G").is_err());
    }

    #[test]
    fn iv_defaults_to_fixed() {
        assert_eq!(parse_iv(None).unwrap(), FIXED_IV);
        assert!(parse_iv(Some("00")).is_err());
        assert_eq!(
            parse_iv(Some("000102030405060708090a0b0c0d0e0f")).unwrap(),
            core::array::from_fn::<u8, 16, _>(|i| i as u8)
        );
    }

    #[test]
    fn message_line_is_trimmed() {
        let input = io::Cursor::new("  HELLO \r\nignored\n");
        assert_eq!(read_message(input).unwrap(), "HELLO");
        assert!(read_message(io::Cursor::new("")).is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(5));
        let mut b = seeded_rng(Some(5));
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn cli_parses_session_flags() {
        let cli = Cli::try_parse_from([
            "aescbc",
            "demo",
            "--message",
            "HELLO",
            "--seed",
            "7",
            "--random-iv",
        ])
        .unwrap();
        match cli.command {
            Commands::Demo { message, opts } => {
                assert_eq!(message, "HELLO");
                assert_eq!(opts.seed, Some(7));
                assert_eq!(opts.config().iv, IvPolicy::Random);
                assert_eq!(opts.config().padding, PaddingCheck::Strict);
                assert_eq!(opts.config().capacity, DEFAULT_CAPACITY);
            }
            _ => panic!("expected demo"),
        }
    }
}
