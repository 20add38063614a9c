#![no_main]

use cosmwallet_core::crypto::{decrypt, EncryptedPayload, KdfParams, MIN_KDF_ITERATIONS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(transit) = std::str::from_utf8(data) else {
        return;
    };

    // Parsed payloads must survive a trip back to the transit format
    if let Ok(payload) = EncryptedPayload::parse(transit) {
        let reparsed = EncryptedPayload::parse(&payload.to_transit());
        assert_eq!(reparsed.as_ref(), Ok(&payload));

        let _ = decrypt(transit, "password123", &KdfParams::new(MIN_KDF_ITERATIONS));
    }
});
