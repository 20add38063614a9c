//! Security-specific tests.
//!
//! These tests verify:
//! 1. Keystores reject wrong passwords and tampering
//! 2. Secrets never leak through Debug or persisted JSON
//! 3. Malformed inputs don't panic
//! 4. Signatures don't verify for the wrong signer or document

use base64::prelude::*;
use cosmwallet_core::crypto::{decrypt, encrypt, CryptoError, EncryptedPayload};
use cosmwallet_core::{
    import_wallet_from_mnemonic, open_keystore, parse_mnemonic, prefix_from_chain_id, test_password,
    DerivationConfig, KdfParams, KeyPair, Keystore, KeystoreError, OsEntropy,
};
use cosmwallet_signer::signing::sha256;
use cosmwallet_signer::{
    serialize_sign_doc, verify_amino, verify_signature, CosmosSigner, Secp256k1Wallet, StdFee,
    StdSignDoc,
};
use cosmwallet_signer::test_vectors::*;
use zeroize::Zeroize;

fn keystore() -> Keystore {
    import_wallet_from_mnemonic(
        "main",
        "password123",
        TEST_MNEMONIC,
        &DerivationConfig::default(),
        &TEST_KDF,
        &mut OsEntropy,
    )
    .unwrap()
}

fn tamper(keystore: &Keystore, f: impl FnOnce(&mut Vec<u8>, &mut [u8; 16], &mut [u8; 16])) -> Keystore {
    let payload = EncryptedPayload::parse(&keystore.wallet).unwrap();
    let mut salt = *payload.salt();
    let mut iv = *payload.iv();
    let mut ciphertext = payload.ciphertext().to_vec();
    f(&mut ciphertext, &mut salt, &mut iv);

    let wallet = format!(
        "{}{}{}",
        hex::encode(salt),
        hex::encode(iv),
        BASE64_STANDARD.encode(&ciphertext)
    );
    Keystore {
        wallet,
        ..keystore.clone()
    }
}

// ============================================================================
// 1. Keystore Encryption Security Tests
// ============================================================================

#[test]
fn test_wrong_password_rejected() {
    let keystore = keystore();
    for password in ["password124", "Password123", "password123 ", ""] {
        assert!(!test_password(&keystore, password, &TEST_KDF), "accepted {:?}", password);
    }
    assert!(test_password(&keystore, "password123", &TEST_KDF));
}

#[test]
fn test_wrong_password_is_password_error() {
    assert!(matches!(
        open_keystore(&keystore(), "password124", &TEST_KDF),
        Err(KeystoreError::PasswordIncorrect)
    ));
}

#[test]
fn test_tampered_salt_rejected() {
    let tampered = tamper(&keystore(), |_, salt, _| salt[0] ^= 0xFF);
    assert!(!test_password(&tampered, "password123", &TEST_KDF));
}

#[test]
fn test_tampered_iv_rejected() {
    let tampered = tamper(&keystore(), |_, _, iv| iv[0] ^= 0x01);
    assert!(!test_password(&tampered, "password123", &TEST_KDF));
}

#[test]
fn test_tampered_ciphertext_rejected() {
    let tampered = tamper(&keystore(), |ciphertext, _, _| {
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0xFF;
    });
    assert!(!test_password(&tampered, "password123", &TEST_KDF));
}

#[test]
fn test_truncated_ciphertext_rejected() {
    let tampered = tamper(&keystore(), |ciphertext, _, _| ciphertext.truncate(16));
    assert!(!test_password(&tampered, "password123", &TEST_KDF));
}

#[test]
fn test_fresh_salt_and_iv_per_encryption() {
    let a = encrypt("same message", "password123", &TEST_KDF, &mut OsEntropy).unwrap();
    let b = encrypt("same message", "password123", &TEST_KDF, &mut OsEntropy).unwrap();
    assert_ne!(a, b);
    assert_eq!(*decrypt(&a, "password123", &TEST_KDF).unwrap(), "same message");
    assert_eq!(*decrypt(&b, "password123", &TEST_KDF).unwrap(), "same message");
}

#[test]
fn test_iteration_count_must_match() {
    let keystore = keystore();
    assert!(!test_password(&keystore, "password123", &KdfParams { iterations: 2_048 }));
}

#[test]
fn test_weak_kdf_refused() {
    let result = encrypt("message", "password123", &KdfParams { iterations: 1 }, &mut OsEntropy);
    assert!(result.is_err());
}

// ============================================================================
// 2. Secret Hygiene
// ============================================================================

#[test]
fn test_keystore_json_has_no_secrets() {
    let json = serde_json::to_string(&keystore()).unwrap();
    assert!(!json.contains(TEST_PRIVATE_KEY));
    assert!(!json.contains("raven"));
    assert!(json.contains(TEST_ADDRESS));
}

#[test]
fn test_debug_output_has_no_secrets() {
    let key_pair = KeyPair::from_hex(TEST_PRIVATE_KEY).unwrap();
    assert!(!format!("{:?}", key_pair).contains(TEST_PRIVATE_KEY));

    let record = open_keystore(&keystore(), "password123", &TEST_KDF).unwrap();
    assert!(!format!("{:?}", record).contains(TEST_PRIVATE_KEY));

    let signer = Secp256k1Wallet::from_private_key_hex(TEST_PRIVATE_KEY, "cosmos").unwrap();
    assert!(!format!("{:?}", signer).contains(TEST_PRIVATE_KEY));
}

#[test]
fn test_zeroize_works_on_record() {
    let mut record = open_keystore(&keystore(), "password123", &TEST_KDF).unwrap();
    assert_eq!(record.private_key, TEST_PRIVATE_KEY);
    record.zeroize();
    assert!(record.private_key.is_empty());
    assert!(record.address.is_empty());
}

// ============================================================================
// 3. Malformed Input Panic Tests (should NOT panic)
// ============================================================================

#[test]
fn test_parse_mnemonic_garbage_does_not_panic() {
    let inputs = [
        "",
        "a",
        "hello world",
        "abandon abandon abandon",
        &"abandon ".repeat(100),
        "🎉 🎊 🎈 🎃 🎄 🎅 🎆 🎇 🎁 🎂 🎀 🎍",
        "\0\0\0\0\0\0\0\0\0\0\0\0",
        &"a".repeat(10000),
    ];

    for input in &inputs {
        assert!(parse_mnemonic(input).is_err(), "accepted {:?}", input);
    }
}

#[test]
fn test_transit_garbage_does_not_panic() {
    let inputs = [
        String::new(),
        "00".to_string(),
        "0".repeat(63),
        "0".repeat(64),
        "z".repeat(64) + "AAAAAAAAAAAAAAAAAAAAAA==",
        "0".repeat(64) + "not base64",
        "0".repeat(64) + "AAAA",
        "é".repeat(40),
        "🎉".repeat(40),
    ];

    for input in &inputs {
        assert!(EncryptedPayload::parse(input).is_err(), "accepted {:?}", input);
        assert!(matches!(
            decrypt(input, "password123", &TEST_KDF),
            Err(CryptoError::InvalidFormat)
        ));
    }
}

#[test]
fn test_chain_id_garbage_does_not_panic() {
    for input in ["", ":", "cosmos:", "cosmos", "eip155:1", "::::", "cosmos:-"] {
        let _ = prefix_from_chain_id(input);
    }
    assert!(prefix_from_chain_id("eip155:1").is_err());
}

#[test]
fn test_amino_json_garbage_does_not_panic() {
    let inputs = [
        "",
        "{}",
        "[]",
        r#"{"chain_id":1}"#,
        r#"{"chain_id":"c","account_number":"1","sequence":"1","fee":{},"msgs":[],"memo":""}"#,
        "\0",
    ];
    for input in &inputs {
        let _ = serde_json::from_str::<StdSignDoc>(input);
    }
}

// ============================================================================
// 4. Signature Binding
// ============================================================================

#[test]
fn test_signature_bit_flips_never_verify() {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let signer = Secp256k1Wallet::from_private_key_hex(TEST_PRIVATE_KEY, "cosmos").unwrap();
    let doc = StdSignDoc::new("foochain", 7, 54, StdFee::new(vec![], 23), vec![], "hello, world");
    let signature = signer.sign_amino(TEST_ADDRESS, &doc).unwrap().signature.signature;
    let bytes = BASE64_STANDARD.decode(&signature).unwrap();

    for _ in 0..64 {
        let mut mutated = bytes.clone();
        let idx = rng.gen_range(0..mutated.len());
        mutated[idx] ^= 1 << rng.gen_range(0..8);
        assert!(!verify_amino(TEST_ADDRESS, &BASE64_STANDARD.encode(&mutated), &doc));
    }
}

#[test]
fn test_signature_from_other_key_rejected() {
    let other = Secp256k1Wallet::from_private_key_hex(&"11".repeat(32), "cosmos").unwrap();
    let doc = StdSignDoc::new("foochain", 7, 54, StdFee::new(vec![], 23), vec![], "hello, world");
    let hash = sha256(&serialize_sign_doc(&doc).unwrap());

    let signature = other.sign_amino(other.address(), &doc).unwrap().signature.signature;
    assert!(verify_signature(other.address(), &signature, &hash));
    assert!(!verify_signature(TEST_ADDRESS, &signature, &hash));
}

#[test]
fn test_cannot_sign_for_foreign_address() {
    let signer = Secp256k1Wallet::from_private_key_hex(TEST_PRIVATE_KEY, "cosmos").unwrap();
    let other = Secp256k1Wallet::from_private_key_hex(&"11".repeat(32), "cosmos").unwrap();
    let doc = StdSignDoc::new("foochain", 7, 54, StdFee::new(vec![], 23), vec![], "");
    assert!(signer.sign_amino(other.address(), &doc).is_err());
}

#[test]
fn test_same_key_under_other_prefix_rejected() {
    let signer = Secp256k1Wallet::from_private_key_hex(TEST_PRIVATE_KEY, "cosmos").unwrap();
    let doc = StdSignDoc::new("kava-4", 1, 1, StdFee::new(vec![], 1), vec![], "");
    let signature = signer.sign_amino(TEST_ADDRESS, &doc).unwrap().signature.signature;

    let kava = Secp256k1Wallet::from_private_key_hex(TEST_PRIVATE_KEY, "kava").unwrap();
    assert!(signer.verify_amino_signature(TEST_ADDRESS, &signature, &doc));
    assert!(!signer.verify_amino_signature(kava.address(), &signature, &doc));
}
