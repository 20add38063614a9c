//! cosmwallet core
//!
//! Key material and keystores for Cosmos SDK accounts.
//!
//! # Key Derivation
//!
//! From a single BIP-39 mnemonic:
//! - secp256k1 account key via BIP-44: m/44'/118'/0'/0/0
//! - bech32 account address: RIPEMD-160(SHA-256(compressed pubkey))
//!
//! # Encrypted Storage
//!
//! Wallet records are encrypted at rest using PBKDF2-HMAC-SHA256 + AES-256-CBC.
//! Randomness is always supplied by the caller through [`EntropySource`].

pub mod address;
pub mod config;
pub mod crypto;
pub mod entropy;
pub mod keys;
pub mod keystore;
pub mod password;
pub mod seed;

#[cfg(any(test, feature = "test-vectors"))]
pub mod test_vectors;

pub use address::*;
pub use config::{ConfigError, DerivationConfig, KeystoreConfig, WalletConfig};
pub use crypto::{decrypt, encrypt, CryptoError, EncryptedPayload, KdfParams};
pub use entropy::{EntropySource, OsEntropy};
pub use keys::*;
pub use keystore::*;
pub use password::{verify_password, PasswordError, MIN_PASSWORD_LENGTH};
pub use seed::*;
