//! Encrypted keystores
//!
//! A [`Keystore`] is the persisted form of a wallet: a name, the public
//! address and the wallet record sealed under a password. Storage of the
//! keystore itself is left to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::address::{address_from_public_key, AddressError};
use crate::config::DerivationConfig;
use crate::crypto::{decrypt, encrypt, CryptoError, KdfParams};
use crate::entropy::EntropySource;
use crate::keys::{derive_key_pair_from_mnemonic, KeyError, KeyPair};
use crate::password::{verify_password, PasswordError};
use crate::seed::generate_mnemonic;

#[derive(Error, Debug)]
pub enum KeystoreError {
    #[error("Keystore password is incorrect")]
    PasswordIncorrect,
    #[error("Keystore record does not match keystore address {keystore} (record has {record})")]
    RecordMismatch { keystore: String, record: String },
    #[error("Wallet record serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Address(#[from] AddressError),
}

/// Persisted, password-encrypted wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keystore {
    pub name: String,
    pub address: String,
    /// Transit string of the encrypted [`WalletRecord`]
    pub wallet: String,
}

/// Plaintext wallet record, hex-encoded keys.
///
/// Only ever exists inside an unlocked keystore for the duration of one
/// operation. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

impl WalletRecord {
    pub fn from_key_pair(key_pair: &KeyPair, prefix: &str) -> Result<Self, AddressError> {
        Ok(Self {
            private_key: hex::encode(key_pair.private_key()),
            public_key: hex::encode(key_pair.public_key()),
            address: address_from_public_key(key_pair.public_key(), prefix)?,
        })
    }

    /// Rebuild the key pair, checking the stored public key against it
    pub fn key_pair(&self) -> Result<KeyPair, KeyError> {
        let key_pair = KeyPair::from_hex(&self.private_key)?;
        if hex::encode(key_pair.public_key()) != self.public_key.to_lowercase() {
            return Err(KeyError::DerivationFailed(
                "stored public key does not match private key".to_string(),
            ));
        }
        Ok(key_pair)
    }
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derive a wallet record from a mnemonic
pub fn generate_wallet_from_mnemonic(
    mnemonic: &str,
    derivation: &DerivationConfig,
) -> Result<WalletRecord, KeystoreError> {
    let key_pair = derive_key_pair_from_mnemonic(mnemonic, &derivation.path)?;
    Ok(WalletRecord::from_key_pair(&key_pair, &derivation.address_prefix)?)
}

/// Generate a fresh wallet record from injected entropy
pub fn generate_wallet(
    derivation: &DerivationConfig,
    source: &mut impl EntropySource,
) -> Result<WalletRecord, KeystoreError> {
    let mnemonic = generate_mnemonic(source).map_err(KeyError::from)?;
    let words = Zeroizing::new(mnemonic.to_string());
    generate_wallet_from_mnemonic(&words, derivation)
}

/// Seal a wallet record under `password`
pub fn create_keystore(
    name: &str,
    password: &str,
    record: &WalletRecord,
    kdf: &KdfParams,
    source: &mut impl EntropySource,
) -> Result<Keystore, KeystoreError> {
    verify_password(password)?;

    let json = Zeroizing::new(
        serde_json::to_string(record).map_err(|e| KeystoreError::Serialization(e.to_string()))?,
    );
    let wallet = encrypt(&json, password, kdf, source)?;

    log::debug!("Created keystore '{}' for {}", name, record.address);
    Ok(Keystore {
        name: name.to_string(),
        address: record.address.clone(),
        wallet,
    })
}

/// Create a keystore for a brand new wallet
pub fn create_new_wallet(
    name: &str,
    password: &str,
    derivation: &DerivationConfig,
    kdf: &KdfParams,
    source: &mut impl EntropySource,
) -> Result<Keystore, KeystoreError> {
    verify_password(password)?;
    let record = generate_wallet(derivation, source)?;
    create_keystore(name, password, &record, kdf, source)
}

/// Create a keystore for a wallet restored from a mnemonic
pub fn import_wallet_from_mnemonic(
    name: &str,
    password: &str,
    mnemonic: &str,
    derivation: &DerivationConfig,
    kdf: &KdfParams,
    source: &mut impl EntropySource,
) -> Result<Keystore, KeystoreError> {
    verify_password(password)?;
    let record = generate_wallet_from_mnemonic(mnemonic, derivation)?;
    create_keystore(name, password, &record, kdf, source)
}

/// Unlock a keystore and return its wallet record
///
/// # Errors
/// [`KeystoreError::PasswordIncorrect`] when the ciphertext does not decrypt
/// to a wallet record under `password`.
pub fn open_keystore(
    keystore: &Keystore,
    password: &str,
    kdf: &KdfParams,
) -> Result<WalletRecord, KeystoreError> {
    let plaintext = decrypt(&keystore.wallet, password, kdf).map_err(|e| match e {
        CryptoError::DecryptionFailed(_) => {
            log::warn!("Failed to unlock keystore '{}'", keystore.name);
            KeystoreError::PasswordIncorrect
        }
        other => KeystoreError::Crypto(other),
    })?;

    let record: WalletRecord = serde_json::from_str(&plaintext).map_err(|_| {
        log::warn!("Failed to unlock keystore '{}'", keystore.name);
        KeystoreError::PasswordIncorrect
    })?;

    if record.address != keystore.address {
        return Err(KeystoreError::RecordMismatch {
            keystore: keystore.address.clone(),
            record: record.address.clone(),
        });
    }

    Ok(record)
}

/// Whether `password` unlocks `keystore`. Never propagates the cause.
pub fn test_password(keystore: &Keystore, password: &str, kdf: &KdfParams) -> bool {
    open_keystore(keystore, password, kdf).is_ok()
}
