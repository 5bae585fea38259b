//! ECDH over short Weierstrass curves backed by the RustCrypto `elliptic-curve` arithmetic.

use alloc::vec::Vec;
use core::marker::PhantomData;

use elliptic_curve::{
    AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey, SecretKey,
    ecdh::{EphemeralSecret, diffie_hellman},
    generic_array::typenum::Unsigned,
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
};
use rand::{CryptoRng, RngCore};

use super::{KeyAgreementScheme, PointError, SharedSecret};
use crate::keys::PointEncoding;

/// ECDH key agreement on the curve `C`.
pub struct Ecdh<C> {
    _phantom: PhantomData<C>,
}

impl<C> KeyAgreementScheme for Ecdh<C>
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    const FIELD_LEN: usize = <FieldBytesSize<C> as Unsigned>::USIZE;

    type SecretKey = SecretKey<C>;
    type PublicKey = PublicKey<C>;
    type EphemeralSecretKey = EphemeralSecret<C>;
    type EphemeralPublicKey = PublicKey<C>;

    fn generate_ephemeral_keypair<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> (Self::EphemeralSecretKey, Self::EphemeralPublicKey) {
        let secret = EphemeralSecret::<C>::random(rng);
        let public = secret.public_key();
        (secret, public)
    }

    fn exchange_ephemeral_static(
        ephemeral_secret: &Self::EphemeralSecretKey,
        recipient_public: &Self::PublicKey,
    ) -> SharedSecret {
        let shared = ephemeral_secret.diffie_hellman(recipient_public);
        SharedSecret::from_x_coordinate(shared.raw_secret_bytes())
    }

    fn exchange_static_ephemeral(
        recipient_secret: &Self::SecretKey,
        ephemeral_public: &Self::EphemeralPublicKey,
    ) -> SharedSecret {
        let shared =
            diffie_hellman(recipient_secret.to_nonzero_scalar(), ephemeral_public.as_affine());
        SharedSecret::from_x_coordinate(shared.raw_secret_bytes())
    }

    fn encode_ephemeral_public_key(
        key: &Self::EphemeralPublicKey,
        encoding: PointEncoding,
    ) -> Vec<u8> {
        key.to_encoded_point(encoding.is_compressed()).as_bytes().to_vec()
    }

    fn decode_ephemeral_public_key(bytes: &[u8]) -> Result<Self::EphemeralPublicKey, PointError> {
        let encoded = EncodedPoint::<C>::from_bytes(bytes).map_err(|_| PointError::Malformed)?;

        // rejects both off-curve coordinates and the identity
        Option::from(PublicKey::<C>::from_encoded_point(&encoded)).ok_or(PointError::NotOnCurve)
    }
}
