//! Long-term ECIES keys on the supported named curves.

use alloc::vec::Vec;
use core::fmt;

use elliptic_curve::sec1::ToEncodedPoint;
use k256::Secp256k1;
use p256::NistP256;
use p384::NistP384;
use rand::{CryptoRng, RngCore};
use sm2::Sm2;
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

use crate::ecies::{
    CipherSuite, EciesError, EncryptionParams, SharedInfo, seal_on_curve, unseal_on_curve,
};

mod curve;
pub use curve::{Curve, PointEncoding, TAG_COMPRESSED_EVEN_Y, TAG_COMPRESSED_ODD_Y, TAG_UNCOMPRESSED};

mod parse;
pub use parse::{parse_private_key, parse_private_key_pem, parse_public_key, parse_public_key_pem};


/// Expands `$body` once per curve with `$inner` bound to the curve-specific key.
macro_rules! on_curve {
    ($key:expr, $ty:ident, $inner:ident => $body:expr) => {
        match $key {
            $ty::P256($inner) => $body,
            $ty::P384($inner) => $body,
            $ty::Secp256k1($inner) => $body,
            $ty::Sm2($inner) => $body,
        }
    };
}

/// Builds a key of type `$ty` on the runtime curve `$curve` from a generic constructor.
macro_rules! for_curve {
    ($curve:expr, $ty:ident, $ctor:expr) => {
        match $curve {
            Curve::P256 => $ty::P256($ctor),
            Curve::P384 => $ty::P384($ctor),
            Curve::Secp256k1 => $ty::Secp256k1($ctor),
            Curve::Sm2 => $ty::Sm2($ctor),
        }
    };
}

// PUBLIC KEY
// ================================================================================================

/// Public key of an ECIES recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    P256(elliptic_curve::PublicKey<NistP256>),
    P384(elliptic_curve::PublicKey<NistP384>),
    Secp256k1(elliptic_curve::PublicKey<Secp256k1>),
    Sm2(elliptic_curve::PublicKey<Sm2>),
}

impl PublicKey {
    /// Returns the curve this key lives on.
    pub fn curve(&self) -> Curve {
        match self {
            PublicKey::P256(_) => Curve::P256,
            PublicKey::P384(_) => Curve::P384,
            PublicKey::Secp256k1(_) => Curve::Secp256k1,
            PublicKey::Sm2(_) => Curve::Sm2,
        }
    }

    /// Decodes a SEC1 point (compressed or uncompressed) on `curve`.
    pub fn from_sec1_bytes(curve: Curve, bytes: &[u8]) -> Result<Self, EciesError> {
        let key = for_curve!(
            curve,
            PublicKey,
            elliptic_curve::PublicKey::from_sec1_bytes(bytes)
                .map_err(|_| EciesError::InvalidKey)?
        );
        Ok(key)
    }

    /// Serializes the key as a SEC1 point.
    pub fn to_sec1_bytes(&self, encoding: PointEncoding) -> Vec<u8> {
        on_curve!(self, PublicKey, key => {
            key.to_encoded_point(encoding.is_compressed()).as_bytes().to_vec()
        })
    }

    /// Encrypts `plaintext` to this key, binding `info` into the envelope.
    pub fn encrypt_with_rng<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
        params: &EncryptionParams,
        info: SharedInfo<'_>,
    ) -> Result<Vec<u8>, EciesError> {
        trace!(
            curve = %self.curve(),
            suite = %params.suite,
            plaintext_len = plaintext.len(),
            "ecies encrypt"
        );

        on_curve!(self, PublicKey, key => {
            seal_on_curve(rng, key, plaintext, params.suite, params.point_encoding, info)
        })
    }
}

// SECRET KEY
// ================================================================================================

/// Secret key of an ECIES recipient.
#[derive(Clone)]
pub enum SecretKey {
    P256(elliptic_curve::SecretKey<NistP256>),
    P384(elliptic_curve::SecretKey<NistP384>),
    Secp256k1(elliptic_curve::SecretKey<Secp256k1>),
    Sm2(elliptic_curve::SecretKey<Sm2>),
}

impl SecretKey {
    /// Generates a random secret key on `curve` using the operating system's random number
    /// generator.
    #[cfg(feature = "std")]
    pub fn new(curve: Curve) -> Self {
        let mut rng = rand::rngs::OsRng;
        Self::with_rng(curve, &mut rng)
    }

    /// Generates a random secret key on `curve` using the provided random number generator.
    pub fn with_rng<R: CryptoRng + RngCore>(curve: Curve, rng: &mut R) -> Self {
        for_curve!(curve, SecretKey, elliptic_curve::SecretKey::random(rng))
    }

    /// Builds a secret key from a big-endian scalar.
    ///
    /// Fails if the scalar is zero, not below the group order, or has the wrong length.
    pub fn from_bytes(curve: Curve, scalar: &[u8]) -> Result<Self, EciesError> {
        let key = for_curve!(
            curve,
            SecretKey,
            elliptic_curve::SecretKey::from_slice(scalar).map_err(|_| EciesError::InvalidKey)?
        );
        Ok(key)
    }

    /// Returns the big-endian scalar in a buffer that is wiped on drop.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        on_curve!(self, SecretKey, key => {
            let mut bytes = key.to_bytes();
            let out = Zeroizing::new(bytes.to_vec());
            bytes.as_mut_slice().zeroize();
            out
        })
    }

    pub fn curve(&self) -> Curve {
        match self {
            SecretKey::P256(_) => Curve::P256,
            SecretKey::P384(_) => Curve::P384,
            SecretKey::Secp256k1(_) => Curve::Secp256k1,
            SecretKey::Sm2(_) => Curve::Sm2,
        }
    }

    /// Returns the public key corresponding to this secret key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            SecretKey::P256(key) => PublicKey::P256(key.public_key()),
            SecretKey::P384(key) => PublicKey::P384(key.public_key()),
            SecretKey::Secp256k1(key) => PublicKey::Secp256k1(key.public_key()),
            SecretKey::Sm2(key) => PublicKey::Sm2(key.public_key()),
        }
    }

    /// Decrypts an envelope that was sealed with the shared info `info`.
    pub fn decrypt_with_info(
        &self,
        ciphertext: &[u8],
        suite: CipherSuite,
        info: SharedInfo<'_>,
    ) -> Result<Vec<u8>, EciesError> {
        trace!(curve = %self.curve(), %suite, len = ciphertext.len(), "ecies decrypt");

        on_curve!(self, SecretKey, key => unseal_on_curve(key, ciphertext, suite, info))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&self.curve()).finish_non_exhaustive()
    }
}
