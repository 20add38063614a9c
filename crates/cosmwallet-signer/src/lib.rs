//! cosmwallet signer
//!
//! Signing and verification for Cosmos SDK transactions.
//!
//! # Sign Modes
//!
//! - **Direct**: SHA-256 over the protobuf `SignDoc`
//! - **Amino**: SHA-256 over the sorted, escaped JSON `StdSignDoc`
//!
//! Both produce a 64-byte `r || s` secp256k1 signature. Verification
//! recovers the public key from the signature and compares addresses.
//!
//! # Example
//!
//! ```ignore
//! use cosmwallet_core::{KdfParams, OsEntropy};
//! use cosmwallet_signer::{CosmosSigner, KeystoreWallet, WalletOptions};
//!
//! let options = WalletOptions::new("main", "correct horse").with_mnemonic(words);
//! let wallet = KeystoreWallet::new(options, KdfParams::default(), &mut OsEntropy)?;
//! let signer = wallet.signer()?;
//! let response = signer.sign_direct(wallet.address(), &sign_doc)?;
//! ```

pub mod amino;
pub mod proto;
pub mod sign_doc;
pub mod signer;
pub mod signing;
pub mod verify;
pub mod wallet;

#[cfg(any(test, feature = "test-vectors"))]
pub mod test_vectors;

use cosmwallet_core::{AddressError, KeyError, KeystoreError, PasswordError};
use thiserror::Error;

pub use amino::{serialize_sign_doc, sorted_json_stringify, AminoMsg, StdFee, StdSignDoc};
pub use proto::{Any, Coin, SignDoc};
pub use sign_doc::{format_direct_sign_doc, make_auth_info_bytes, make_sign_bytes, SignDocError, SignDocJson};
pub use signer::{AccountData, CosmosSigner, Secp256k1Wallet};
pub use signing::{
    sign_amino, sign_direct, sign_with_private_key, AminoSignResponse, DirectSignResponse, SignError,
    StdSignature,
};
pub use verify::{verify_amino, verify_direct, verify_signature, verify_signature_with_prefix};
pub use wallet::{KeystoreWallet, WalletOptions};

/// Errors from wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Keystore password is incorrect")]
    KeystorePasswordIncorrect,

    #[error("Wallet name is required")]
    NameRequired,

    #[error("Provide either a keystore or a mnemonic, not both")]
    ConflictingSources,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Sign(#[from] SignError),

    #[error(transparent)]
    SignDoc(#[from] SignDocError),
}
