//! End-to-end wallet lifecycle.
//!
//! Exercises the full flow across both crates without any network:
//!
//! 1. Mnemonic import and fresh wallet creation
//! 2. Keystore persistence (JSON) and restore
//! 3. Direct and amino signing against known vectors
//! 4. Verification by public key recovery
//! 5. Export under a new password
//!
//! Run with: cargo test --test wallet_lifecycle

use base64::prelude::*;
use cosmwallet_core::{
    address_from_public_key_for_chain, open_keystore, test_password, DerivationConfig,
    Keystore, OsEntropy, WalletConfig,
};
use cosmwallet_signer::proto::Any;
use cosmwallet_signer::sign_doc::secp256k1_pub_key_any;
use cosmwallet_signer::test_vectors::*;
use cosmwallet_signer::{
    format_direct_sign_doc, verify_signature, AminoMsg, Coin, CosmosSigner, KeystoreWallet, SignDoc,
    SignDocJson, StdFee, StdSignDoc, WalletError, WalletOptions,
};

fn import(name: &str, password: &str) -> KeystoreWallet {
    let options = WalletOptions::new(name, password).with_mnemonic(TEST_MNEMONIC);
    KeystoreWallet::new(options, TEST_KDF, &mut OsEntropy).unwrap()
}

fn direct_doc() -> SignDoc {
    format_direct_sign_doc(
        &[Coin::new("2000", "ucosm")],
        Any::default(),
        200_000,
        1,
        1,
        TEST_BODY_BYTES,
        "cosmoshub-4",
    )
    .unwrap()
}

// ============================================================================
// 1. Import, persist, restore
// ============================================================================

#[test]
fn test_import_persist_restore() {
    let wallet = import("main", "password123");
    assert_eq!(wallet.address(), TEST_ADDRESS);

    // Persist as JSON, as a caller would
    let json = serde_json::to_string(wallet.keystore()).unwrap();
    let stored: Keystore = serde_json::from_str(&json).unwrap();
    assert!(!json.contains(TEST_PRIVATE_KEY));

    let options = WalletOptions::new("ignored", "password123").with_keystore(stored);
    let restored = KeystoreWallet::new(options, TEST_KDF, &mut OsEntropy).unwrap();
    assert_eq!(restored.address(), TEST_ADDRESS);
    assert_eq!(restored.name(), "main");
    assert_eq!(restored.sign("ping").unwrap(), wallet.sign("ping").unwrap());
}

#[test]
fn test_fresh_wallets_are_distinct() {
    let a = KeystoreWallet::new(WalletOptions::new("a", "password123"), TEST_KDF, &mut OsEntropy).unwrap();
    let b = KeystoreWallet::new(WalletOptions::new("b", "password123"), TEST_KDF, &mut OsEntropy).unwrap();
    assert_ne!(a.address(), b.address());
    assert!(a.address().starts_with("cosmos1"));
}

#[test]
fn test_restore_with_wrong_password() {
    let keystore = import("main", "password123").keystore().clone();
    let options = WalletOptions::new("main", "password999").with_keystore(keystore);
    assert!(matches!(
        KeystoreWallet::new(options, TEST_KDF, &mut OsEntropy),
        Err(WalletError::KeystorePasswordIncorrect)
    ));
}

// ============================================================================
// 2. Signing and verification
// ============================================================================

#[test]
fn test_direct_sign_and_verify() {
    let wallet = import("main", "password123");
    let signer = wallet.signer().unwrap();
    let doc = direct_doc();

    let response = signer.sign_direct(wallet.address(), &doc).unwrap();
    assert_eq!(response.signature.signature, TEST_DIRECT_SIGNATURE);
    assert!(signer.verify_direct_signature(TEST_ADDRESS, TEST_DIRECT_SIGNATURE, &doc));
    assert!(!signer.verify_direct_signature(
        OTHER_ADDRESS,
        TEST_DIRECT_SIGNATURE,
        &doc
    ));
}

#[test]
fn test_amino_sign_and_verify() {
    let signer = import("main", "password123").signer().unwrap();
    let doc = StdSignDoc::new("foochain", 7, 54, StdFee::new(vec![], 23), vec![], "hello, world");

    let response = signer.sign_amino(TEST_ADDRESS, &doc).unwrap();
    assert_eq!(response.signature.signature, TEST_AMINO_SIGNATURE);
    assert!(signer.verify_amino_signature(TEST_ADDRESS, TEST_AMINO_SIGNATURE, &doc));
}

#[test]
fn test_amino_with_messages() {
    let signer = import("main", "password123").signer().unwrap();
    let msg = AminoMsg {
        msg_type: "cosmos-sdk/MsgSend".to_string(),
        value: serde_json::json!({
            "to_address": OTHER_ADDRESS,
            "from_address": TEST_ADDRESS,
            "amount": [{ "denom": "uatom", "amount": "1000" }],
        }),
    };
    let doc = StdSignDoc::new(
        "cosmoshub-4",
        12,
        3,
        StdFee::new(vec![Coin::new("500", "uatom")], 80_000),
        vec![msg],
        "<transfer>",
    );

    let response = signer.sign_amino(TEST_ADDRESS, &doc).unwrap();
    assert!(signer.verify_amino_signature(TEST_ADDRESS, &response.signature.signature, &doc));

    // Same document through JSON keeps the same hash
    let roundtrip: StdSignDoc = serde_json::from_value(serde_json::to_value(&doc).unwrap()).unwrap();
    assert!(signer.verify_amino_signature(TEST_ADDRESS, &response.signature.signature, &roundtrip));
}

#[test]
fn test_direct_doc_with_own_pubkey_through_json() {
    let signer = import("main", "password123").signer().unwrap();
    let pubkey = signer.accounts()[0].pubkey.clone();
    let doc = format_direct_sign_doc(
        &[Coin::new("2000", "ucosm")],
        secp256k1_pub_key_any(&pubkey),
        200_000,
        u64::MAX,
        1,
        TEST_BODY_BYTES,
        "cosmoshub-4",
    )
    .unwrap();

    let json = SignDocJson::from(&doc);
    assert_eq!(json.account_number, "18446744073709551615");
    let decoded = SignDoc::try_from(&json).unwrap();

    let response = signer.sign_direct(TEST_ADDRESS, &doc).unwrap();
    assert!(signer.verify_direct_signature(TEST_ADDRESS, &response.signature.signature, &decoded));
}

#[test]
fn test_plain_message_signature_recovers() {
    let wallet = import("main", "password123");
    let signature = hex::decode(wallet.sign("hello cosmos").unwrap()).unwrap();
    let hash = cosmwallet_signer::signing::sha256(b"hello cosmos");
    assert!(verify_signature(TEST_ADDRESS, &BASE64_STANDARD.encode(signature), &hash));
}

// ============================================================================
// 3. Export
// ============================================================================

#[test]
fn test_export_and_reopen() {
    let wallet = import("main", "password123");
    let exported = wallet.export("another-password", Some("backup"), &mut OsEntropy).unwrap();

    assert_eq!(exported.name, "backup");
    assert!(test_password(&exported, "another-password", &TEST_KDF));
    assert!(!test_password(&exported, "password123", &TEST_KDF));

    let record = open_keystore(&exported, "another-password", &TEST_KDF).unwrap();
    assert_eq!(record.address, TEST_ADDRESS);
}

// ============================================================================
// 4. Configured chains
// ============================================================================

#[test]
fn test_config_driven_prefix() {
    let config = WalletConfig::from_toml_str(
        r#"
        [derivation]
        address_prefix = "osmo"

        [keystore]
        kdf_iterations = 2000
        "#,
    )
    .unwrap();

    let options = WalletOptions::new("osmo", "password123")
        .with_mnemonic(TEST_MNEMONIC)
        .with_derivation(config.derivation.clone());
    let wallet = KeystoreWallet::new(options, config.keystore.kdf_params(), &mut OsEntropy).unwrap();

    let pubkey = wallet.signer().unwrap().accounts()[0].pubkey.clone();
    let expected = address_from_public_key_for_chain(&pubkey, "cosmos:osmosis-1").unwrap();
    assert_eq!(wallet.address(), expected);
    assert!(wallet.address().starts_with("osmo1"));
}

#[test]
fn test_default_derivation_matches_cosmos_hub() {
    let wallet = import("main", "password123");
    let pubkey = wallet.signer().unwrap().accounts()[0].pubkey.clone();
    assert_eq!(
        address_from_public_key_for_chain(&pubkey, "cosmos:cosmoshub-4").unwrap(),
        TEST_ADDRESS
    );
    assert_eq!(DerivationConfig::default().path, "m/44'/118'/0'/0/0");
}
