#![no_main]

use ecies_suite::{
    Curve, PublicKey, SecretKey, parse_private_key, parse_private_key_pem, parse_public_key,
    parse_public_key_pem,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // DER parsing should NEVER panic
    let _ = parse_private_key(data);
    let _ = parse_public_key(data);

    // PEM parsing should NEVER panic
    if let Ok(text) = core::str::from_utf8(data) {
        let _ = parse_private_key_pem(text);
        let _ = parse_public_key_pem(text);
    }

    // Raw scalar and point decoding on every curve
    for curve in Curve::ALL {
        let _ = SecretKey::from_bytes(curve, data);
        let _ = PublicKey::from_sec1_bytes(curve, data);
    }
});
