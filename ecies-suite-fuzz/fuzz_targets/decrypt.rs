#![no_main]

use ecies_suite::{CipherSuite, Curve, SecretKey, SharedInfo, decrypt};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fuzz_target!(|data: &[u8]| {
    // Using a fixed key per curve for deterministic fuzzing
    let mut rng = ChaCha20Rng::from_seed([0u8; 32]);

    for curve in Curve::ALL {
        let secret_key = SecretKey::with_rng(curve, &mut rng);

        for suite in CipherSuite::ALL {
            // This should NEVER panic - malformed input and tag failures must return Err
            let _ = decrypt(&secret_key, data, suite);

            // Split the input into shared info and ciphertext as well
            if let Some((&split, rest)) = data.split_first() {
                let (info, ciphertext) = rest.split_at((split as usize).min(rest.len()));
                let _ = secret_key.decrypt_with_info(ciphertext, suite, SharedInfo::new(info, info));
            }
        }
    }
});
