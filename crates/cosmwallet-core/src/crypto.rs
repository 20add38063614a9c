//! Keystore encryption
//!
//! Password-based encryption of serialized wallet records using
//! PBKDF2-HMAC-SHA256 + AES-256-CBC (PKCS#7 padding).
//!
//! # Transit Format
//!
//! ```text
//! hex(salt, 16 bytes) || hex(iv, 16 bytes) || base64(ciphertext)
//! ```
//!
//! The salt and IV prefixes are always 32 hex characters each.
//!
//! # Security Notes
//!
//! - Each encryption draws a fresh salt and IV from the injected entropy source
//! - CBC is not authenticated: a wrong password is detected by bad padding,
//!   invalid UTF-8, or (one layer up) a payload that is not a wallet record
//! - The derived key never outlives a single encrypt/decrypt call

use aes::Aes256;
use base64::prelude::*;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::entropy::EntropySource;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Salt length for PBKDF2
pub const SALT_LEN: usize = 16;

/// IV length for AES-CBC
pub const IV_LEN: usize = 16;

/// Derived key length (256 bits for AES-256)
pub const KEY_LEN: usize = 32;

/// AES block size; every ciphertext is a non-empty multiple of it
const BLOCK_LEN: usize = 16;

/// Default PBKDF2 iteration count
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Lowest iteration count accepted by [`KdfParams::validate`]
pub const MIN_KDF_ITERATIONS: u32 = 1_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),
    #[error("Entropy source returned {actual} bytes, expected {expected}")]
    InsufficientEntropy { expected: usize, actual: usize },
    #[error("Invalid ciphertext format")]
    InvalidFormat,
}

/// PBKDF2 parameters.
///
/// The iteration count is not part of the transit string, so a keystore
/// must be opened with the same parameters it was sealed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub iterations: u32,
}

impl KdfParams {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.iterations < MIN_KDF_ITERATIONS {
            return Err(CryptoError::KeyDerivationFailed(format!(
                "iteration count {} is below the minimum of {}",
                self.iterations, MIN_KDF_ITERATIONS
            )));
        }
        Ok(())
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::new(DEFAULT_KDF_ITERATIONS)
    }
}

/// A parsed transit string: salt || iv || ciphertext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Salt used for PBKDF2 key derivation
    salt: [u8; SALT_LEN],
    /// IV used for AES-CBC
    iv: [u8; IV_LEN],
    /// Padded ciphertext
    ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Serialize to the transit string
    pub fn to_transit(&self) -> String {
        let mut transit = String::with_capacity(2 * (SALT_LEN + IV_LEN) + self.ciphertext.len() * 2);
        transit.push_str(&hex::encode(self.salt));
        transit.push_str(&hex::encode(self.iv));
        transit.push_str(&BASE64_STANDARD.encode(&self.ciphertext));
        transit
    }

    /// Split a transit string into its fixed-width prefixes and ciphertext
    pub fn parse(transit: &str) -> Result<Self, CryptoError> {
        let salt_end = 2 * SALT_LEN;
        let iv_end = salt_end + 2 * IV_LEN;

        let salt_hex = transit.get(..salt_end).ok_or(CryptoError::InvalidFormat)?;
        let iv_hex = transit.get(salt_end..iv_end).ok_or(CryptoError::InvalidFormat)?;
        let body = transit.get(iv_end..).ok_or(CryptoError::InvalidFormat)?;

        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        hex::decode_to_slice(salt_hex, &mut salt).map_err(|_| CryptoError::InvalidFormat)?;
        hex::decode_to_slice(iv_hex, &mut iv).map_err(|_| CryptoError::InvalidFormat)?;

        let ciphertext = BASE64_STANDARD
            .decode(body)
            .map_err(|_| CryptoError::InvalidFormat)?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CryptoError::InvalidFormat);
        }

        Ok(Self {
            salt,
            iv,
            ciphertext,
        })
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

/// Derive an encryption key from a password using PBKDF2-HMAC-SHA256
fn derive_key(password: &str, salt: &[u8; SALT_LEN], kdf: &KdfParams) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, kdf.iterations, key.as_mut_slice());
    key
}

fn random_array<const N: usize>(source: &mut impl EntropySource) -> Result<[u8; N], CryptoError> {
    let bytes = source.random_bytes(N);
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InsufficientEntropy {
            expected: N,
            actual: bytes.len(),
        })
}

/// Encrypt `plaintext` under `password`
///
/// Each call draws a new random salt and IV from `source`.
pub fn encrypt_payload(
    plaintext: &[u8],
    password: &str,
    kdf: &KdfParams,
    source: &mut impl EntropySource,
) -> Result<EncryptedPayload, CryptoError> {
    kdf.validate()?;

    let salt = random_array::<SALT_LEN>(source)?;
    let iv = random_array::<IV_LEN>(source)?;

    let key = derive_key(password, &salt, kdf);
    let ciphertext = Aes256CbcEnc::new_from_slices(key.as_slice(), &iv)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok(EncryptedPayload {
        salt,
        iv,
        ciphertext,
    })
}

/// Decrypt a payload with a password
///
/// # Errors
/// Returns [`CryptoError::DecryptionFailed`] if the padding does not check out
/// (almost always a wrong password). Never returns unpadded garbage.
pub fn decrypt_payload(
    payload: &EncryptedPayload,
    password: &str,
    kdf: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    kdf.validate()?;

    let key = derive_key(password, &payload.salt, kdf);
    let plaintext = Aes256CbcDec::new_from_slices(key.as_slice(), &payload.iv)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(&payload.ciphertext)
        .map_err(|_| {
            CryptoError::DecryptionFailed("Invalid password or corrupted data".to_string())
        })?;

    Ok(Zeroizing::new(plaintext))
}

/// Encrypt a UTF-8 message into a transit string
pub fn encrypt(
    message: &str,
    password: &str,
    kdf: &KdfParams,
    source: &mut impl EntropySource,
) -> Result<String, CryptoError> {
    encrypt_payload(message.as_bytes(), password, kdf, source).map(|p| p.to_transit())
}

/// Decrypt a transit string back into the UTF-8 message
pub fn decrypt(transit: &str, password: &str, kdf: &KdfParams) -> Result<Zeroizing<String>, CryptoError> {
    let payload = EncryptedPayload::parse(transit)?;
    let plaintext = decrypt_payload(&payload, password, kdf)?;
    let text = std::str::from_utf8(&plaintext)
        .map_err(|_| CryptoError::DecryptionFailed("Decrypted data is not UTF-8".to_string()))?;
    Ok(Zeroizing::new(text.to_owned()))
}
