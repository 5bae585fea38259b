//! ECDH (Elliptic Curve Diffie-Hellman) key agreement.
//!
//! Note that the intended use is in the context of a one-way, sender initiated key agreement
//! scenario. Namely, when the sender knows the (static) public key of the receiver and it
//! uses that, together with an ephemeral secret key that it generates, to derive a shared
//! secret. The public key associated with the ephemeral secret key travels alongside the
//! encrypted message.

use alloc::vec::Vec;
use core::fmt;

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::keys::PointEncoding;

mod weierstrass;
pub use weierstrass::Ecdh;

// KEY AGREEMENT TRAIT
// ================================================================================================

/// A key agreement scheme producing a [SharedSecret] from one static and one ephemeral key.
pub trait KeyAgreementScheme {
    /// Number of bytes in a serialized field element of the underlying curve.
    const FIELD_LEN: usize;

    type SecretKey;
    type PublicKey;
    type EphemeralSecretKey: ZeroizeOnDrop;
    type EphemeralPublicKey;

    /// Generates a fresh ephemeral key pair from the provided random number generator.
    fn generate_ephemeral_keypair<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> (Self::EphemeralSecretKey, Self::EphemeralPublicKey);

    /// Computes the shared secret on the sender side.
    fn exchange_ephemeral_static(
        ephemeral_secret: &Self::EphemeralSecretKey,
        recipient_public: &Self::PublicKey,
    ) -> SharedSecret;

    /// Computes the shared secret on the recipient side.
    fn exchange_static_ephemeral(
        recipient_secret: &Self::SecretKey,
        ephemeral_public: &Self::EphemeralPublicKey,
    ) -> SharedSecret;

    /// Serializes an ephemeral public key as a SEC1 octet string.
    fn encode_ephemeral_public_key(
        key: &Self::EphemeralPublicKey,
        encoding: PointEncoding,
    ) -> Vec<u8>;

    /// Deserializes and validates an ephemeral public key received from the sender.
    fn decode_ephemeral_public_key(bytes: &[u8]) -> Result<Self::EphemeralPublicKey, PointError>;
}

// SHARED SECRET
// ================================================================================================

/// Shared secret `Z` produced by ECDH.
///
/// Holds the x-coordinate of the shared point as a big-endian integer with leading zero bytes
/// removed. The buffer is wiped when the value is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    /// Builds a shared secret from a fixed-width big-endian x-coordinate.
    pub(crate) fn from_x_coordinate(x: &[u8]) -> Self {
        let start = x.iter().position(|&byte| byte != 0).unwrap_or(x.len());
        Self { bytes: x[start..].to_vec() }
    }

    /// Returns the secret bytes to be fed into key derivation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

// ERRORS
// ================================================================================================

/// Reasons an encoded point can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointError {
    /// The bytes are not a well-formed SEC1 point encoding for this curve.
    Malformed,
    /// The encoding is well-formed but does not describe a non-identity point on the curve.
    NotOnCurve,
}

impl fmt::Display for PointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointError::Malformed => write!(f, "malformed point encoding"),
            PointError::NotOnCurve => write!(f, "point is not on the curve"),
        }
    }
}

impl core::error::Error for PointError {}
