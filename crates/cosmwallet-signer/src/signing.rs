//! Signing engine
//!
//! Both document kinds are signed the same way: SHA-256 over the canonical
//! encoding, then a deterministic (RFC 6979) low-S ECDSA signature over
//! secp256k1, serialized as the 64-byte `r || s` compact form. The recovery
//! id is dropped.
//!
//! The canonical encodings come from [`crate::sign_doc::make_sign_bytes`] and
//! [`crate::amino::serialize_sign_doc`]; the verifier hashes with the same
//! functions.

use base64::prelude::*;
use cosmwallet_core::{address_from_public_key, address_prefix_or_default, AddressError, KeyError, KeyPair};
use secp256k1::{Message, Secp256k1};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::amino::{serialize_sign_doc, StdSignDoc};
use crate::proto::SignDoc;
use crate::sign_doc::make_sign_bytes;

/// Amino type of a secp256k1 public key
pub const SECP256K1_PUB_KEY_TYPE: &str = "tendermint/PubKeySecp256k1";

/// Compact signature size
pub const SIGNATURE_LEN: usize = 64;

#[derive(Error, Debug)]
pub enum SignError {
    #[error("Address {claimed} not found in wallet (wallet address is {actual})")]
    AddressMismatch { claimed: String, actual: String },
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("Sign doc serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Amino JSON public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKeyJson {
    #[serde(rename = "type")]
    pub key_type: String,
    /// Base64 of the compressed public key
    pub value: String,
}

/// Signature envelope: public key plus base64 `r || s`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: PubKeyJson,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectSignResponse {
    pub signed: SignDoc,
    pub signature: StdSignature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoSignResponse {
    pub signed: StdSignDoc,
    pub signature: StdSignature,
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub fn encode_secp256k1_signature(public_key: &[u8], signature: &[u8; SIGNATURE_LEN]) -> StdSignature {
    StdSignature {
        pub_key: PubKeyJson {
            key_type: SECP256K1_PUB_KEY_TYPE.to_string(),
            value: BASE64_STANDARD.encode(public_key),
        },
        signature: BASE64_STANDARD.encode(signature),
    }
}

/// Sign a 32-byte message hash, returning `r || s`
pub fn sign_hash(key_pair: &KeyPair, message_hash: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN], SignError> {
    let secret = key_pair.secret_key()?;
    let secp = Secp256k1::signing_only();
    let signature = secp.sign_ecdsa(&Message::from_digest(*message_hash), &secret);
    Ok(signature.serialize_compact())
}

/// Sign a direct sign doc
pub fn sign_direct(key_pair: &KeyPair, sign_doc: &SignDoc) -> Result<DirectSignResponse, SignError> {
    let hash = sha256(&make_sign_bytes(sign_doc));
    let signature = sign_hash(key_pair, &hash)?;

    log::debug!("Signed direct doc for chain {}", sign_doc.chain_id);
    Ok(DirectSignResponse {
        signed: sign_doc.clone(),
        signature: encode_secp256k1_signature(key_pair.public_key(), &signature),
    })
}

/// Sign an amino sign doc on behalf of `claimed_address`.
///
/// Refuses with [`SignError::AddressMismatch`] unless the claimed address is
/// the key pair's own address (under the claimed address's prefix).
pub fn sign_amino(
    key_pair: &KeyPair,
    sign_doc: &StdSignDoc,
    claimed_address: &str,
) -> Result<AminoSignResponse, SignError> {
    let prefix = address_prefix_or_default(claimed_address);
    let actual = address_from_public_key(key_pair.public_key(), &prefix)?;
    if actual != claimed_address {
        log::warn!("Refusing amino signature for foreign address {}", claimed_address);
        return Err(SignError::AddressMismatch {
            claimed: claimed_address.to_string(),
            actual,
        });
    }

    let hash = sha256(&serialize_sign_doc(sign_doc)?);
    let signature = sign_hash(key_pair, &hash)?;

    log::debug!("Signed amino doc for chain {}", sign_doc.chain_id);
    Ok(AminoSignResponse {
        signed: sign_doc.clone(),
        signature: encode_secp256k1_signature(key_pair.public_key(), &signature),
    })
}

/// Sign the SHA-256 of an arbitrary UTF-8 message with a hex private key,
/// returning the hex `r || s` signature
pub fn sign_with_private_key(message: &str, private_key_hex: &str) -> Result<String, SignError> {
    let key_pair =
        KeyPair::from_hex(private_key_hex).map_err(|e| SignError::InvalidPrivateKey(e.to_string()))?;
    let signature = sign_hash(&key_pair, &sha256(message.as_bytes()))?;
    Ok(hex::encode(signature))
}
