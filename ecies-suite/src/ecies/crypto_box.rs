//! Generic ECIES pipeline.
//!
//! `CryptoBox` combines a key agreement scheme (ECDH on one curve) with a cipher suite (hash and
//! symmetric cipher) to produce and open `R || EM || D` envelopes.

use alloc::vec::Vec;
use core::marker::PhantomData;

use elliptic_curve::{
    AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey, SecretKey,
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use super::{
    CipherSuite, EciesError, SharedInfo,
    envelope::Envelope,
    suite::{AesSha256, Sm4Sm3, Suite},
};
use crate::{
    cipher::{CipherError, SymmetricCipher},
    ecdh::{Ecdh, KeyAgreementScheme, PointError},
    kdf::derive_keys,
    keys::PointEncoding,
    mac::{compute_tag, verify_tag},
};

/// A generic ECIES primitive parameterized by a key agreement scheme and a cipher suite
pub(crate) struct CryptoBox<K: KeyAgreementScheme, S: Suite> {
    _phantom: PhantomData<(K, S)>,
}

impl<K: KeyAgreementScheme, S: Suite> CryptoBox<K, S> {
    pub(crate) fn seal<R: CryptoRng + RngCore>(
        rng: &mut R,
        recipient_public_key: &K::PublicKey,
        plaintext: &[u8],
        point_encoding: PointEncoding,
        info: SharedInfo<'_>,
    ) -> Result<Vec<u8>, EciesError> {
        let (ephemeral_private, ephemeral_public) = K::generate_ephemeral_keypair(rng);
        let shared_secret = K::exchange_ephemeral_static(&ephemeral_private, recipient_public_key);
        drop(ephemeral_private);

        let keys = derive_keys::<S::Hash>(
            shared_secret.as_bytes(),
            info.s1,
            <S::Cipher as SymmetricCipher>::KEY_SIZE,
        )?;
        drop(shared_secret);

        let ciphertext = S::Cipher::encrypt(keys.encryption_key(), rng, plaintext)
            .map_err(|_| EciesError::EncryptionFailed)?;
        let tag = compute_tag::<S::Hash>(keys.mac_key(), &ciphertext, info.s2)?;

        let ephemeral_key = K::encode_ephemeral_public_key(&ephemeral_public, point_encoding);

        Ok(Envelope {
            ephemeral_key: &ephemeral_key,
            ciphertext: &ciphertext,
            tag: &tag,
        }
        .to_bytes())
    }

    pub(crate) fn unseal(
        recipient_private_key: &K::SecretKey,
        envelope: &[u8],
        info: SharedInfo<'_>,
    ) -> Result<Vec<u8>, EciesError> {
        let envelope = Envelope::split(envelope, K::FIELD_LEN, S::ID.tag_len())?;

        let ephemeral_public =
            K::decode_ephemeral_public_key(envelope.ephemeral_key).map_err(|err| {
                debug!(%err, "rejecting ephemeral public key");
                match err {
                    PointError::Malformed => EciesError::EphemeralKeyDecodingFailed,
                    PointError::NotOnCurve => EciesError::InvalidPoint,
                }
            })?;

        let shared_secret = K::exchange_static_ephemeral(recipient_private_key, &ephemeral_public);
        let keys = derive_keys::<S::Hash>(
            shared_secret.as_bytes(),
            info.s1,
            <S::Cipher as SymmetricCipher>::KEY_SIZE,
        )?;
        drop(shared_secret);

        verify_tag::<S::Hash>(keys.mac_key(), envelope.ciphertext, info.s2, envelope.tag)
            .inspect_err(|_| debug!("rejecting ciphertext with mismatched tag"))?;

        S::Cipher::decrypt(keys.encryption_key(), envelope.ciphertext).map_err(|err| {
            debug!(%err, "rejecting symmetric ciphertext");
            decryption_error(err)
        })
    }
}

/// A short payload is malformed input; a key of the wrong size is a derivation failure.
fn decryption_error(err: CipherError) -> EciesError {
    match err {
        CipherError::CiphertextTooShort { .. } => EciesError::SymmetricCiphertextTooShort,
        CipherError::InvalidKeyLength { .. } => EciesError::KeyDerivationFailed,
    }
}

// CURVE DISPATCH
// ================================================================================================

/// Runs [CryptoBox::seal] on the curve `C` with the cipher suite selected at runtime.
pub(crate) fn seal_on_curve<C, R>(
    rng: &mut R,
    recipient: &PublicKey<C>,
    plaintext: &[u8],
    suite: CipherSuite,
    point_encoding: PointEncoding,
    info: SharedInfo<'_>,
) -> Result<Vec<u8>, EciesError>
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    R: CryptoRng + RngCore,
{
    match suite {
        CipherSuite::Aes256CfbSha256 => CryptoBox::<Ecdh<C>, AesSha256>::seal(
            rng,
            recipient,
            plaintext,
            point_encoding,
            info,
        ),
        CipherSuite::Sm4CfbSm3 => {
            CryptoBox::<Ecdh<C>, Sm4Sm3>::seal(rng, recipient, plaintext, point_encoding, info)
        },
    }
}

/// Runs [CryptoBox::unseal] on the curve `C` with the cipher suite selected at runtime.
pub(crate) fn unseal_on_curve<C>(
    recipient: &SecretKey<C>,
    envelope: &[u8],
    suite: CipherSuite,
    info: SharedInfo<'_>,
) -> Result<Vec<u8>, EciesError>
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    match suite {
        CipherSuite::Aes256CfbSha256 => {
            CryptoBox::<Ecdh<C>, AesSha256>::unseal(recipient, envelope, info)
        },
        CipherSuite::Sm4CfbSm3 => CryptoBox::<Ecdh<C>, Sm4Sm3>::unseal(recipient, envelope, info),
    }
}

// TESTS
// ================================================================================================
