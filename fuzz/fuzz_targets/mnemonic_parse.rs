#![no_main]

use cosmwallet_core::keys::derive_key_pair_from_mnemonic;
use cosmwallet_core::seed::parse_mnemonic;
use cosmwallet_core::DEFAULT_DERIVATION_PATH;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary UTF-8 as a BIP-39 mnemonic. Parsing and derivation return
    // Ok or Err, never panic.
    if let Ok(s) = std::str::from_utf8(data) {
        if parse_mnemonic(s).is_ok() {
            let _ = derive_key_pair_from_mnemonic(s, DEFAULT_DERIVATION_PATH);
        }
    }
});
