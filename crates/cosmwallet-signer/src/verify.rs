//! Signature verification by public key recovery
//!
//! Signatures carry no recovery id, so each of the four candidates is tried
//! in turn. A candidate matches when the public key it recovers hashes to
//! the claimed address under the default `cosmos` prefix. Addresses under
//! any other prefix only verify through [`verify_signature_with_prefix`].

use base64::prelude::*;
use cosmwallet_core::{address_from_public_key, DEFAULT_ADDRESS_PREFIX};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, Secp256k1};

use crate::amino::{serialize_sign_doc, StdSignDoc};
use crate::proto::SignDoc;
use crate::sign_doc::make_sign_bytes;
use crate::signing::{sha256, SIGNATURE_LEN};

pub const RECOVERY_IDS: [i32; 4] = [0, 1, 2, 3];

/// Recover the compressed public key for one recovery id
pub fn recover_public_key(
    signature: &[u8; SIGNATURE_LEN],
    message_hash: &[u8; 32],
    recovery_id: i32,
) -> Option<[u8; 33]> {
    let id = RecoveryId::from_i32(recovery_id).ok()?;
    let recoverable = RecoverableSignature::from_compact(signature, id).ok()?;
    let secp = Secp256k1::verification_only();
    let public_key = secp
        .recover_ecdsa(&Message::from_digest(*message_hash), &recoverable)
        .ok()?;
    Some(public_key.serialize())
}

/// Address recovered with one recovery id, under `prefix`
pub fn recover_address(
    signature: &[u8; SIGNATURE_LEN],
    message_hash: &[u8; 32],
    recovery_id: i32,
    prefix: &str,
) -> Option<String> {
    let public_key = recover_public_key(signature, message_hash, recovery_id)?;
    address_from_public_key(&public_key, prefix).ok()
}

fn candidate_matches(
    address: &str,
    signature: &[u8; SIGNATURE_LEN],
    message_hash: &[u8; 32],
    recovery_id: i32,
    prefix: &str,
) -> bool {
    recover_address(signature, message_hash, recovery_id, prefix).as_deref() == Some(address)
}

/// Recovery ids whose recovered key is `address` under the default prefix
pub fn matching_recovery_ids(
    address: &str,
    signature: &[u8; SIGNATURE_LEN],
    message_hash: &[u8; 32],
) -> Vec<i32> {
    RECOVERY_IDS
        .iter()
        .copied()
        .filter(|&id| candidate_matches(address, signature, message_hash, id, DEFAULT_ADDRESS_PREFIX))
        .collect()
}

/// Check a base64 `r || s` signature over `message_hash` against a
/// `cosmos` address.
///
/// Malformed input and failed recoveries count as a non-match.
pub fn verify_signature(address: &str, signature_b64: &str, message_hash: &[u8; 32]) -> bool {
    verify_signature_with_prefix(address, signature_b64, message_hash, DEFAULT_ADDRESS_PREFIX)
}

/// Like [`verify_signature`], with candidate addresses built under `prefix`
pub fn verify_signature_with_prefix(
    address: &str,
    signature_b64: &str,
    message_hash: &[u8; 32],
    prefix: &str,
) -> bool {
    let Ok(decoded) = BASE64_STANDARD.decode(signature_b64) else {
        log::debug!("Signature for {} is not valid base64", address);
        return false;
    };
    let Ok(signature) = <[u8; SIGNATURE_LEN]>::try_from(decoded.as_slice()) else {
        log::debug!("Signature for {} has length {}", address, decoded.len());
        return false;
    };

    let verified = RECOVERY_IDS
        .iter()
        .any(|&id| candidate_matches(address, &signature, message_hash, id, prefix));
    log::debug!("Verified signature for {}: {}", address, verified);
    verified
}

pub fn verify_direct(address: &str, signature_b64: &str, sign_doc: &SignDoc) -> bool {
    verify_signature(address, signature_b64, &sha256(&make_sign_bytes(sign_doc)))
}

pub fn verify_amino(address: &str, signature_b64: &str, sign_doc: &StdSignDoc) -> bool {
    match serialize_sign_doc(sign_doc) {
        Ok(bytes) => verify_signature(address, signature_b64, &sha256(&bytes)),
        Err(e) => {
            log::debug!("Could not serialize amino sign doc: {}", e);
            false
        }
    }
}
