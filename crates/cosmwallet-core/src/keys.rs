//! Key derivation from BIP-39 mnemonic
//!
//! Derives the single secp256k1 account key used by the wallet via the
//! Cosmos BIP-44 path (coin type 118).

use std::fmt;

use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::Network;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::seed::{derive_seed, parse_mnemonic, SeedError};

/// BIP-44 derivation path for Cosmos SDK accounts
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/118'/0'/0/0";

/// Raw secp256k1 private key size
pub const PRIVATE_KEY_LEN: usize = 32;

/// Compressed secp256k1 public key size
pub const PUBLIC_KEY_LEN: usize = 33;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("Derivation failed: {0}")]
    DerivationFailed(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// A secp256k1 account key pair.
///
/// The public key is always the compressed point of the private key.
/// The private key is wiped when the pair is dropped.
#[derive(Clone)]
pub struct KeyPair {
    private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    public_key: [u8; PUBLIC_KEY_LEN],
}

impl KeyPair {
    /// Build a key pair from a 32-byte private key.
    ///
    /// Empty, short or out-of-range keys are rejected; a signing key is
    /// never substituted.
    pub fn from_private_key(private_key: &[u8]) -> Result<Self, KeyError> {
        if private_key.len() != PRIVATE_KEY_LEN {
            return Err(KeyError::DerivationFailed(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_LEN,
                private_key.len()
            )));
        }
        let secret = SecretKey::from_slice(private_key)
            .map_err(|e| KeyError::DerivationFailed(e.to_string()))?;
        Ok(Self::from_secret_key(&secret))
    }

    /// Build a key pair from a hex-encoded private key
    pub fn from_hex(private_key_hex: &str) -> Result<Self, KeyError> {
        let bytes = Zeroizing::new(
            hex::decode(private_key_hex.trim())
                .map_err(|e| KeyError::DerivationFailed(format!("invalid private key hex: {}", e)))?,
        );
        Self::from_private_key(&bytes)
    }

    pub fn from_secret_key(secret: &SecretKey) -> Self {
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, secret).serialize();
        Self {
            private_key: Zeroizing::new(secret.secret_bytes()),
            public_key,
        }
    }

    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }

    /// The private key as a libsecp256k1 secret
    pub fn secret_key(&self) -> Result<SecretKey, KeyError> {
        SecretKey::from_slice(self.private_key.as_slice())
            .map_err(|e| KeyError::DerivationFailed(e.to_string()))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

/// Compressed public key for a raw private key
pub fn public_key_from_private_key(private_key: &[u8]) -> Result<[u8; PUBLIC_KEY_LEN], KeyError> {
    Ok(*KeyPair::from_private_key(private_key)?.public_key())
}

/// Validate a mnemonic and derive the BIP-32 master key from its seed
pub fn derive_master_key(mnemonic: &str) -> Result<Xpriv, KeyError> {
    let mnemonic = parse_mnemonic(mnemonic)?;
    let seed = Zeroizing::new(derive_seed(&mnemonic, ""));

    Xpriv::new_master(Network::Bitcoin, seed.as_slice())
        .map_err(|e| KeyError::DerivationFailed(e.to_string()))
}

/// Derive the account key pair at `derivation_path` below `master`
pub fn derive_key_pair(master: &Xpriv, derivation_path: &str) -> Result<KeyPair, KeyError> {
    let path: DerivationPath = derivation_path
        .parse()
        .map_err(|e: bitcoin::bip32::Error| KeyError::InvalidPath(e.to_string()))?;

    let derived = master
        .derive_priv(&Secp256k1::new(), &path)
        .map_err(|e| KeyError::DerivationFailed(e.to_string()))?;

    log::debug!("Derived account key at {}", derivation_path);
    Ok(KeyPair::from_secret_key(&derived.private_key))
}

/// Mnemonic straight to the account key pair
pub fn derive_key_pair_from_mnemonic(
    mnemonic: &str,
    derivation_path: &str,
) -> Result<KeyPair, KeyError> {
    let master = derive_master_key(mnemonic)?;
    derive_key_pair(&master, derivation_path)
}
