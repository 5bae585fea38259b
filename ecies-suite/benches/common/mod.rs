pub mod data;

/// Plaintext sizes (in bytes) used across the benchmarks
pub const DATA_SIZES: &[usize] = &[16, 256, 4096, 65536];
