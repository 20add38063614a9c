//! Bech32 account addresses
//!
//! An account address is `bech32(prefix, RIPEMD-160(SHA-256(pubkey)))` over
//! the 33-byte compressed secp256k1 public key.
//!
//! # Chain ids
//!
//! Chain ids are CAIP-2 style `namespace:reference`, e.g. `cosmos:cosmoshub-4`.
//! The leading dash-delimited token of the reference names the network,
//! which selects the address prefix. Unknown networks fall back to
//! [`DEFAULT_ADDRESS_PREFIX`].

use bech32::{FromBase32, ToBase32, Variant};
use bitcoin::hashes::{hash160, Hash};
use thiserror::Error;

/// Address prefix of the Cosmos Hub
pub const DEFAULT_ADDRESS_PREFIX: &str = "cosmos";

/// The only supported chain id namespace
pub const COSMOS_NAMESPACE: &str = "cosmos";

/// Network name to bech32 prefix
const NETWORK_PREFIXES: &[(&str, &str)] = &[
    ("cosmoshub", "cosmos"),
    ("irishub", "iaa"),
    ("kava", "kava"),
    ("columbus", "terra"),
    ("phoenix", "terra"),
    ("osmosis", "osmo"),
    ("juno", "juno"),
    ("akashnet", "akash"),
    ("secret", "secret"),
    ("stargaze", "stars"),
    ("regen", "regen"),
    ("sentinelhub", "sent"),
    ("core", "persistence"),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Cannot get address with incompatible namespace for chainId: {0}")]
    UnsupportedNamespace(String),
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),
    #[error("Bech32 encoding failed: {0}")]
    Encoding(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Derive the account address for a public key under `prefix`
///
/// # Example
/// ```
/// use cosmwallet_core::address::address_from_public_key;
/// let pubkey = hex::decode("0204848ceb8eafdf754251c2391466744e5a85529ec81ae6b60a187a90a9406396").unwrap();
/// let address = address_from_public_key(&pubkey, "cosmos").unwrap();
/// assert_eq!(address, "cosmos1sguafvgmel6f880ryvq8efh9522p8zvmrzlcrq");
/// ```
pub fn address_from_public_key(public_key: &[u8], prefix: &str) -> Result<String, AddressError> {
    let hash = hash160::Hash::hash(public_key);
    bech32ify(hash.as_byte_array(), prefix)
}

/// Derive the account address for a public key on `chain_id`
pub fn address_from_public_key_for_chain(
    public_key: &[u8],
    chain_id: &str,
) -> Result<String, AddressError> {
    let prefix = prefix_from_chain_id(chain_id)?;
    address_from_public_key(public_key, prefix)
}

/// Bech32-encode raw bytes under `prefix`
pub fn bech32ify(data: &[u8], prefix: &str) -> Result<String, AddressError> {
    bech32::encode(prefix, data.to_base32(), Variant::Bech32)
        .map_err(|e| AddressError::Encoding(e.to_string()))
}

/// Decode a bech32 address into its prefix and payload
pub fn debech32ify(address: &str) -> Result<(String, Vec<u8>), AddressError> {
    let (prefix, words, variant) =
        bech32::decode(address).map_err(|e| AddressError::InvalidAddress(e.to_string()))?;
    if variant != Variant::Bech32 {
        return Err(AddressError::InvalidAddress(format!(
            "{} is not a bech32 address",
            address
        )));
    }
    let data =
        Vec::<u8>::from_base32(&words).map_err(|e| AddressError::InvalidAddress(e.to_string()))?;
    Ok((prefix, data))
}

/// Human-readable prefix of a bech32 address
pub fn address_prefix(address: &str) -> Result<String, AddressError> {
    debech32ify(address).map(|(prefix, _)| prefix)
}

/// Prefix of `address`, or [`DEFAULT_ADDRESS_PREFIX`] when it does not decode
pub fn address_prefix_or_default(address: &str) -> String {
    address_prefix(address).unwrap_or_else(|_| DEFAULT_ADDRESS_PREFIX.to_string())
}

/// Resolve the address prefix for a `namespace:reference` chain id.
///
/// Fails only for a foreign namespace; an unknown network name resolves to
/// the default prefix.
pub fn prefix_from_chain_id(chain_id: &str) -> Result<&'static str, AddressError> {
    let (namespace, reference) = match chain_id.split_once(':') {
        Some((namespace, reference)) => (namespace, Some(reference)),
        None => (chain_id, None),
    };
    if namespace != COSMOS_NAMESPACE {
        return Err(AddressError::UnsupportedNamespace(chain_id.to_string()));
    }
    let reference = reference.ok_or_else(|| AddressError::InvalidChainId(chain_id.to_string()))?;

    // Only the segment between the first and second colon names the network
    let reference = reference.split(':').next().unwrap_or_default();
    let name = reference.split('-').next().unwrap_or_default();
    match NETWORK_PREFIXES.iter().find(|(network, _)| *network == name) {
        Some(&(_, prefix)) => Ok(prefix),
        None => {
            log::debug!(
                "No address prefix known for network '{}', using '{}'",
                name,
                DEFAULT_ADDRESS_PREFIX
            );
            Ok(DEFAULT_ADDRESS_PREFIX)
        }
    }
}
