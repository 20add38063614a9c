//! BIP-39 mnemonic management
//!
//! Handles entropy generation, mnemonic encoding/parsing and seed derivation.

use bip39::{Language, Mnemonic};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::entropy::EntropySource;

/// Entropy size for newly generated wallets (256 bits = 24 words)
pub const ENTROPY_LENGTH: usize = 32;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("Entropy has incorrect length: expected {expected} bytes, got {actual}")]
    EntropyLengthMismatch { expected: usize, actual: usize },
    #[error("Invalid entropy: {0}")]
    InvalidEntropy(String),
}

/// Draw `length` bytes of entropy from `source`.
///
/// Fails with [`SeedError::EntropyLengthMismatch`] if the source returns
/// any other number of bytes.
pub fn generate_entropy(
    source: &mut impl EntropySource,
    length: usize,
) -> Result<Zeroizing<Vec<u8>>, SeedError> {
    let entropy = Zeroizing::new(source.random_bytes(length));
    if entropy.len() != length {
        return Err(SeedError::EntropyLengthMismatch {
            expected: length,
            actual: entropy.len(),
        });
    }
    Ok(entropy)
}

/// Encode entropy as an English BIP-39 mnemonic
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<Mnemonic, SeedError> {
    Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| SeedError::InvalidEntropy(e.to_string()))
}

/// Generate a new 24-word mnemonic from injected entropy
pub fn generate_mnemonic(source: &mut impl EntropySource) -> Result<Mnemonic, SeedError> {
    let entropy = generate_entropy(source, ENTROPY_LENGTH)?;
    entropy_to_mnemonic(&entropy)
}

/// Parse a mnemonic from words, validating wordlist and checksum
pub fn parse_mnemonic(words: &str) -> Result<Mnemonic, SeedError> {
    Mnemonic::parse_in(Language::English, words)
        .map_err(|e| SeedError::InvalidMnemonic(e.to_string()))
}

/// Derive seed bytes from mnemonic (with optional passphrase)
pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> [u8; 64] {
    mnemonic.to_seed(passphrase)
}
