//! Keystore-backed wallet
//!
//! [`KeystoreWallet`] holds an encrypted [`Keystore`] and the password that
//! opens it. The private key is only decrypted for the duration of a single
//! call.

use std::fmt;

use cosmwallet_core::{
    address_prefix_or_default, create_keystore, create_new_wallet, import_wallet_from_mnemonic,
    open_keystore, verify_password, DerivationConfig, EntropySource, KdfParams, Keystore,
    KeystoreError, WalletRecord,
};
use zeroize::Zeroizing;

use crate::signer::Secp256k1Wallet;
use crate::signing::sign_with_private_key;
use crate::WalletError;

/// Construction options for [`KeystoreWallet`].
///
/// At most one of `keystore` and `mnemonic` may be set. With neither, a
/// fresh wallet is generated.
#[derive(Clone)]
pub struct WalletOptions {
    pub name: String,
    pub password: Zeroizing<String>,
    pub derivation: DerivationConfig,
    pub keystore: Option<Keystore>,
    pub mnemonic: Option<Zeroizing<String>>,
}

impl WalletOptions {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: Zeroizing::new(password.into()),
            derivation: DerivationConfig::default(),
            keystore: None,
            mnemonic: None,
        }
    }

    /// Restore from an existing keystore
    pub fn with_keystore(mut self, keystore: Keystore) -> Self {
        self.keystore = Some(keystore);
        self
    }

    /// Import from a mnemonic
    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Some(Zeroizing::new(mnemonic.into()));
        self
    }

    pub fn with_derivation(mut self, derivation: DerivationConfig) -> Self {
        self.derivation = derivation;
        self
    }
}

impl fmt::Debug for WalletOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletOptions")
            .field("name", &self.name)
            .field("derivation", &self.derivation)
            .field("keystore", &self.keystore)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

pub struct KeystoreWallet {
    keystore: Keystore,
    password: Zeroizing<String>,
    kdf: KdfParams,
}

impl KeystoreWallet {
    /// Build a wallet from `options`.
    ///
    /// Checks run in order: password policy, name, the keystore password
    /// when restoring, then conflicting sources. Any keystore that does not
    /// open under the password, corrupt ones included, is reported as
    /// [`WalletError::KeystorePasswordIncorrect`].
    pub fn new(
        options: WalletOptions,
        kdf: KdfParams,
        source: &mut impl EntropySource,
    ) -> Result<Self, WalletError> {
        verify_password(&options.password)?;
        if options.name.is_empty() {
            return Err(WalletError::NameRequired);
        }
        if let Some(keystore) = &options.keystore {
            if let Err(e) = open_keystore(keystore, &options.password, &kdf) {
                log::warn!("Cannot restore wallet '{}': {}", keystore.name, e);
                return Err(WalletError::KeystorePasswordIncorrect);
            }
        }
        if options.keystore.is_some() && options.mnemonic.is_some() {
            return Err(WalletError::ConflictingSources);
        }

        let keystore = match (options.keystore, options.mnemonic) {
            (Some(keystore), _) => {
                log::debug!("Restored wallet '{}' ({})", keystore.name, keystore.address);
                keystore
            }
            (None, Some(mnemonic)) => {
                let keystore = import_wallet_from_mnemonic(
                    &options.name,
                    &options.password,
                    &mnemonic,
                    &options.derivation,
                    &kdf,
                    source,
                )?;
                log::debug!("Imported wallet '{}' ({})", keystore.name, keystore.address);
                keystore
            }
            (None, None) => {
                let keystore = create_new_wallet(
                    &options.name,
                    &options.password,
                    &options.derivation,
                    &kdf,
                    source,
                )?;
                log::debug!("Created wallet '{}' ({})", keystore.name, keystore.address);
                keystore
            }
        };

        Ok(Self {
            keystore,
            password: options.password,
            kdf,
        })
    }

    pub fn address(&self) -> &str {
        &self.keystore.address
    }

    pub fn name(&self) -> &str {
        &self.keystore.name
    }

    pub fn keystore(&self) -> &Keystore {
        &self.keystore
    }

    /// Sign the SHA-256 of `message`, returning the hex `r || s` signature
    pub fn sign(&self, message: &str) -> Result<String, WalletError> {
        let record = open_record(&self.keystore, &self.password, &self.kdf)?;
        Ok(sign_with_private_key(message, &record.private_key)?)
    }

    /// Re-encrypt the wallet under a new password, optionally renamed
    pub fn export(
        &self,
        password: &str,
        name: Option<&str>,
        source: &mut impl EntropySource,
    ) -> Result<Keystore, WalletError> {
        verify_password(password)?;
        let record = open_record(&self.keystore, &self.password, &self.kdf)?;
        let name = name.unwrap_or(&self.keystore.name);
        let keystore = create_keystore(name, password, &record, &self.kdf, source)?;
        log::debug!("Exported wallet '{}' ({})", keystore.name, keystore.address);
        Ok(keystore)
    }

    /// Unlocked signer for direct and amino documents
    pub fn signer(&self) -> Result<Secp256k1Wallet, WalletError> {
        let record = open_record(&self.keystore, &self.password, &self.kdf)?;
        let prefix = address_prefix_or_default(&self.keystore.address);
        Secp256k1Wallet::from_key_pair(record.key_pair()?, &prefix)
    }
}

impl fmt::Debug for KeystoreWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoreWallet")
            .field("keystore", &self.keystore)
            .field("kdf", &self.kdf)
            .finish_non_exhaustive()
    }
}

fn open_record(keystore: &Keystore, password: &str, kdf: &KdfParams) -> Result<WalletRecord, WalletError> {
    open_keystore(keystore, password, kdf).map_err(|e| match e {
        KeystoreError::PasswordIncorrect => WalletError::KeystorePasswordIncorrect,
        other => WalletError::Keystore(other),
    })
}
