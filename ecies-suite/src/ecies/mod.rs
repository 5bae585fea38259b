//! Elliptic Curve Integrated Encryption Scheme (ECIES)
//!
//! Hybrid public-key encryption to an elliptic-curve key. For every message the sender:
//!
//! 1. Generates an ephemeral key pair on the recipient's curve and computes the ECDH shared
//!    secret `Z` with the recipient's public key.
//! 2. Runs HKDF over `Z` (salted with `s1`) to obtain an encryption key and a MAC key.
//! 3. Encrypts the plaintext with the suite's block cipher in CFB mode under a random IV.
//! 4. Tags the ciphertext (followed by `s2`) with HMAC.
//!
//! The output is `R || EM || D`: the SEC1 ephemeral public key, the symmetric ciphertext and
//! the tag. Decryption validates the envelope shape and the ephemeral point, recomputes the
//! keys, checks the tag in constant time and only then decrypts.
//!
//! Two cipher suites are supported, see [CipherSuite]. The suite is not recorded in the
//! envelope, so both sides must agree on it beforehand.
//!
//! # Examples
//!
//! ```
//! use ecies_suite::{CipherSuite, Curve, SecretKey};
//!
//! let secret_key = SecretKey::new(Curve::P256);
//! let public_key = secret_key.public_key();
//!
//! let envelope = ecies_suite::encrypt(&public_key, b"helloworld", CipherSuite::Aes256CfbSha256)?;
//! let plaintext = ecies_suite::decrypt(&secret_key, &envelope, CipherSuite::Aes256CfbSha256)?;
//! assert_eq!(plaintext, b"helloworld");
//! # Ok::<(), ecies_suite::EciesError>(())
//! ```

use alloc::vec::Vec;

use rand::{CryptoRng, RngCore};

use crate::keys::{PublicKey, SecretKey};

mod crypto_box;
pub(crate) use crypto_box::{seal_on_curve, unseal_on_curve};

pub mod envelope;

mod error;
pub use error::EciesError;

mod suite;
pub use suite::{CipherSuite, EncryptionParams, SharedInfo};

#[cfg(test)]
mod tests;

// ENCRYPTION AND DECRYPTION
// ================================================================================================

/// Encrypts `plaintext` to `public_key` using the operating system's random number generator.
///
/// The ephemeral key is written uncompressed and no shared info is bound into the envelope.
#[cfg(feature = "std")]
pub fn encrypt(
    public_key: &PublicKey,
    plaintext: &[u8],
    suite: CipherSuite,
) -> Result<Vec<u8>, EciesError> {
    let mut rng = rand::rngs::OsRng;
    encrypt_with_rng(&mut rng, public_key, plaintext, suite)
}

/// Encrypts `plaintext` to `public_key` drawing randomness from `rng`.
pub fn encrypt_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    public_key: &PublicKey,
    plaintext: &[u8],
    suite: CipherSuite,
) -> Result<Vec<u8>, EciesError> {
    public_key.encrypt_with_rng(
        rng,
        plaintext,
        &EncryptionParams::new(suite),
        SharedInfo::default(),
    )
}

/// Decrypts an envelope produced for the public key matching `secret_key` under `suite`.
pub fn decrypt(
    secret_key: &SecretKey,
    ciphertext: &[u8],
    suite: CipherSuite,
) -> Result<Vec<u8>, EciesError> {
    secret_key.decrypt_with_info(ciphertext, suite, SharedInfo::default())
}
