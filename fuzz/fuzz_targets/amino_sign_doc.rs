#![no_main]

use cosmwallet_signer::amino::{serialize_sign_doc, sorted_json_stringify, StdSignDoc};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any JSON value sorts and escapes without panicking
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = sorted_json_stringify(&value);
    }

    // Any document that deserializes also serializes canonically, twice the same way
    if let Ok(doc) = serde_json::from_slice::<StdSignDoc>(data) {
        if let Ok(first) = serialize_sign_doc(&doc) {
            assert_eq!(serialize_sign_doc(&doc).ok(), Some(first));
        }
    }
});
