#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // A checkpoint file may hold anything; parsing must not panic and
        // anything accepted must print back as 64 lowercase hex digits.
        if let Ok(fingerprint) = schema_sync::Fingerprint::parse(text) {
            let hex = fingerprint.as_str();
            assert_eq!(hex.len(), 64);
            assert!(hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        }
    }
});
