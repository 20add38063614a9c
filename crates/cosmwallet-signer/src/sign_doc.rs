//! Direct-mode sign documents
//!
//! The direct pre-image is the protobuf encoding of [`SignDoc`]. At the
//! serialization boundary the byte fields travel as hex and the account
//! number as a decimal string ([`SignDocJson`]), so 64-bit values never pass
//! through a lossy numeric type.

use prost::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::proto::{
    Any, AuthInfo, Coin, Fee, ModeInfo, PubKey, SignDoc, SignMode, SignerInfo,
    SECP256K1_PUB_KEY_TYPE_URL,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignDocError {
    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },
    #[error("Invalid account number: {0}")]
    InvalidAccountNumber(String),
}

/// Canonical bytes that get hashed and signed
pub fn make_sign_bytes(sign_doc: &SignDoc) -> Vec<u8> {
    sign_doc.encode_to_vec()
}

pub fn make_sign_doc(
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    chain_id: &str,
    account_number: u64,
) -> SignDoc {
    SignDoc {
        body_bytes,
        auth_info_bytes,
        chain_id: chain_id.to_string(),
        account_number,
    }
}

/// Encode an `AuthInfo` with one direct-mode signer per public key
pub fn make_auth_info_bytes(
    pub_keys: &[Any],
    fee_amount: &[Coin],
    gas_limit: u64,
    sequence: u64,
) -> Vec<u8> {
    let auth_info = AuthInfo {
        signer_infos: pub_keys
            .iter()
            .map(|pub_key| SignerInfo {
                public_key: Some(pub_key.clone()),
                mode_info: Some(ModeInfo::single(SignMode::Direct)),
                sequence,
            })
            .collect(),
        fee: Some(Fee {
            amount: fee_amount.to_vec(),
            gas_limit,
            payer: String::new(),
            granter: String::new(),
        }),
    };
    auth_info.encode_to_vec()
}

/// Wrap a compressed secp256k1 public key as a protobuf `Any`
pub fn secp256k1_pub_key_any(public_key: &[u8]) -> Any {
    Any {
        type_url: SECP256K1_PUB_KEY_TYPE_URL.to_string(),
        value: PubKey {
            key: public_key.to_vec(),
        }
        .encode_to_vec(),
    }
}

/// Build a single-signer direct sign doc from its parts.
///
/// `body_bytes_hex` is the already-encoded `TxBody`.
pub fn format_direct_sign_doc(
    fee: &[Coin],
    pub_key: Any,
    gas_limit: u64,
    account_number: u64,
    sequence: u64,
    body_bytes_hex: &str,
    chain_id: &str,
) -> Result<SignDoc, SignDocError> {
    let auth_info_bytes = make_auth_info_bytes(&[pub_key], fee, gas_limit, sequence);
    let body_bytes = decode_hex("bodyBytes", body_bytes_hex)?;
    Ok(make_sign_doc(body_bytes, auth_info_bytes, chain_id, account_number))
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, SignDocError> {
    hex::decode(value).map_err(|e| SignDocError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// String form of a [`SignDoc`] for JSON transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignDocJson {
    pub body_bytes: String,
    pub auth_info_bytes: String,
    pub chain_id: String,
    pub account_number: String,
}

impl From<&SignDoc> for SignDocJson {
    fn from(doc: &SignDoc) -> Self {
        Self {
            body_bytes: hex::encode(&doc.body_bytes),
            auth_info_bytes: hex::encode(&doc.auth_info_bytes),
            chain_id: doc.chain_id.clone(),
            account_number: doc.account_number.to_string(),
        }
    }
}

impl TryFrom<&SignDocJson> for SignDoc {
    type Error = SignDocError;

    fn try_from(json: &SignDocJson) -> Result<Self, Self::Error> {
        let account_number = json
            .account_number
            .parse::<u64>()
            .map_err(|e| SignDocError::InvalidAccountNumber(format!("{}: {}", json.account_number, e)))?;
        Ok(SignDoc {
            body_bytes: decode_hex("bodyBytes", &json.body_bytes)?,
            auth_info_bytes: decode_hex("authInfoBytes", &json.auth_info_bytes)?,
            chain_id: json.chain_id.clone(),
            account_number,
        })
    }
}
