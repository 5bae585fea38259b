use thiserror::Error;

/// Error type for ECIES encryption, decryption and key import.
///
/// Variants never carry key, secret or plaintext bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EciesError {
    // PRECONDITIONS
    // --------------------------------------------------------------------------------------------
    #[error("invalid key material")]
    InvalidKey,
    #[error("key curve does not match the expected curve")]
    CurveMismatch,
    #[error("failed to derive key material for encryption/decryption")]
    KeyDerivationFailed,
    #[error("encryption failed")]
    EncryptionFailed,
    #[error("failed to parse key")]
    KeyParseFailed,

    // MALFORMED INPUT
    // --------------------------------------------------------------------------------------------
    #[error("invalid ciphertext: empty input")]
    EmptyCiphertext,
    #[error("invalid ciphertext: invalid first byte [{0}]")]
    InvalidFirstByte(u8),
    #[error(
        "invalid ciphertext length [first byte = {first_byte}]: got {len} bytes, need at least {min}"
    )]
    InvalidCiphertextLength { first_byte: u8, len: usize, min: usize },
    #[error("invalid ephemeral public key")]
    EphemeralKeyDecodingFailed,
    #[error("cipher text too short")]
    SymmetricCiphertextTooShort,

    // INVALID POINT
    // --------------------------------------------------------------------------------------------
    #[error("ephemeral public key is not a valid point on the curve")]
    InvalidPoint,

    // INTEGRITY
    // --------------------------------------------------------------------------------------------
    #[error("tag check failed")]
    TagMismatch,
}

impl EciesError {
    /// Returns true if the ciphertext was rejected for its structure, before any cryptographic
    /// work was done on it.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            EciesError::EmptyCiphertext
                | EciesError::InvalidFirstByte(_)
                | EciesError::InvalidCiphertextLength { .. }
                | EciesError::EphemeralKeyDecodingFailed
                | EciesError::SymmetricCiphertextTooShort
        )
    }

    /// Returns true for failures that indicate a forged or corrupted ciphertext: an invalid
    /// ephemeral point or a tag mismatch.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, EciesError::InvalidPoint | EciesError::TagMismatch)
    }
}
