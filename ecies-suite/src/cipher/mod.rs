//! Symmetric ciphers used for the data-encapsulation half of ECIES.

use alloc::vec::Vec;
use core::fmt;

use rand::{CryptoRng, RngCore};

mod cfb;
pub use cfb::{Aes256Cfb, Cfb, Sm4Cfb};

// SYMMETRIC CIPHER TRAIT
// ================================================================================================

/// Unauthenticated symmetric encryption; integrity is provided by the MAC layer.
pub trait SymmetricCipher {
    /// Number of key bytes the cipher expects.
    const KEY_SIZE: usize;

    /// Number of bytes the ciphertext is longer than the plaintext.
    const OVERHEAD: usize;

    /// Encrypts `plaintext` under `key`, drawing any randomness (e.g. the IV) from `rng`.
    fn encrypt<R: CryptoRng + RngCore>(
        key: &[u8],
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CipherError>;

    /// Decrypts a ciphertext previously produced by [SymmetricCipher::encrypt].
    fn decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

// ERROR TYPES
// ================================================================================================

/// Errors that can occur during symmetric encryption/decryption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The key does not have the length required by the cipher
    InvalidKeyLength { expected: usize, actual: usize },
    /// The ciphertext is shorter than the prefix it must carry
    CiphertextTooShort { min: usize, actual: usize },
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected} bytes, found {actual}")
            },
            CipherError::CiphertextTooShort { min, actual } => {
                write!(f, "cipher text too short: expected at least {min} bytes, found {actual}")
            },
        }
    }
}

impl core::error::Error for CipherError {}
