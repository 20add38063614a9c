//! Signer abstraction and its secp256k1 implementation

use cosmwallet_core::{address_from_public_key, KeyPair, DEFAULT_ADDRESS_PREFIX};
use serde::{Deserialize, Serialize};

use crate::amino::StdSignDoc;
use crate::proto::SignDoc;
use crate::signing::{self, AminoSignResponse, DirectSignResponse, SignError};
use crate::verify;
use crate::WalletError;

/// Signing algorithm name reported in [`AccountData`]
pub const SECP256K1_ALGO: &str = "secp256k1";

/// Account exposed by a signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub address: String,
    pub algo: String,
    #[serde(with = "hex::serde")]
    pub pubkey: Vec<u8>,
}

/// Capability set of an unlocked wallet.
///
/// One implementation per curve. Verification is independent of the
/// signer's own key and never fails; it only answers yes or no.
pub trait CosmosSigner {
    fn accounts(&self) -> Vec<AccountData>;

    fn sign_direct(&self, signer_address: &str, sign_doc: &SignDoc) -> Result<DirectSignResponse, WalletError>;

    fn sign_amino(&self, signer_address: &str, sign_doc: &StdSignDoc) -> Result<AminoSignResponse, WalletError>;

    fn verify_direct_signature(&self, address: &str, signature_b64: &str, sign_doc: &SignDoc) -> bool;

    fn verify_amino_signature(&self, address: &str, signature_b64: &str, sign_doc: &StdSignDoc) -> bool;
}

/// Single-account secp256k1 signer holding an unlocked key
#[derive(Debug)]
pub struct Secp256k1Wallet {
    key_pair: KeyPair,
    address: String,
}

impl Secp256k1Wallet {
    pub fn from_key_pair(key_pair: KeyPair, prefix: &str) -> Result<Self, WalletError> {
        let address = address_from_public_key(key_pair.public_key(), prefix)?;
        Ok(Self { key_pair, address })
    }

    /// Import a raw hex private key. An empty prefix means `cosmos`.
    pub fn from_private_key_hex(private_key_hex: &str, prefix: &str) -> Result<Self, WalletError> {
        let prefix = if prefix.is_empty() { DEFAULT_ADDRESS_PREFIX } else { prefix };
        Self::from_key_pair(KeyPair::from_hex(private_key_hex)?, prefix)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> &[u8] {
        self.key_pair.public_key()
    }

    fn check_address(&self, signer_address: &str) -> Result<(), SignError> {
        if signer_address != self.address {
            log::warn!("Signer address {} does not belong to this wallet", signer_address);
            return Err(SignError::AddressMismatch {
                claimed: signer_address.to_string(),
                actual: self.address.clone(),
            });
        }
        Ok(())
    }
}

impl CosmosSigner for Secp256k1Wallet {
    fn accounts(&self) -> Vec<AccountData> {
        vec![AccountData {
            address: self.address.clone(),
            algo: SECP256K1_ALGO.to_string(),
            pubkey: self.key_pair.public_key().to_vec(),
        }]
    }

    fn sign_direct(&self, signer_address: &str, sign_doc: &SignDoc) -> Result<DirectSignResponse, WalletError> {
        self.check_address(signer_address)?;
        Ok(signing::sign_direct(&self.key_pair, sign_doc)?)
    }

    fn sign_amino(&self, signer_address: &str, sign_doc: &StdSignDoc) -> Result<AminoSignResponse, WalletError> {
        self.check_address(signer_address)?;
        Ok(signing::sign_amino(&self.key_pair, sign_doc, signer_address)?)
    }

    fn verify_direct_signature(&self, address: &str, signature_b64: &str, sign_doc: &SignDoc) -> bool {
        verify::verify_direct(address, signature_b64, sign_doc)
    }

    fn verify_amino_signature(&self, address: &str, signature_b64: &str, sign_doc: &StdSignDoc) -> bool {
        verify::verify_amino(address, signature_b64, sign_doc)
    }
}
