//! Data generation utilities for consistent benchmark inputs

use ecies_suite::{Curve, SecretKey};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seed shared by every benchmark so runs are reproducible
pub const BENCH_SEED: [u8; 32] = [42; 32];

/// Generate byte array of specified size with sequential data
pub fn generate_byte_array_sequential(size: usize) -> Vec<u8> {
    (0..size).map(|i| i as u8).collect()
}

/// Generate byte array of specified size with random data
pub fn generate_byte_array_random(size: usize) -> Vec<u8> {
    let mut rng = ChaCha20Rng::from_seed(BENCH_SEED);
    let mut result = vec![0u8; size];
    rng.fill_bytes(&mut result);
    result
}

/// Generate a recipient key on `curve` from the shared seed
pub fn generate_secret_key(curve: Curve) -> SecretKey {
    let mut rng = ChaCha20Rng::from_seed(BENCH_SEED);
    SecretKey::with_rng(curve, &mut rng)
}
