//! Import of keys from their standard DER and PEM encodings.
//!
//! Private keys are accepted as SEC1 `ECPrivateKey` structures or PKCS#8 `PrivateKeyInfo`
//! wrapping one. Public keys are accepted as PKIX `SubjectPublicKeyInfo`. In every case the
//! curve is taken from the embedded named-curve OID.

use alloc::vec::Vec;

use elliptic_curve::{
    AffinePoint, CurveArithmetic, FieldBytesSize,
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
};
use sec1::{EcPrivateKey, der::Decode};
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};
use tracing::debug;
use zeroize::Zeroizing;

use super::{Curve, PublicKey, SecretKey};
use crate::ecies::EciesError;

/// `id-ecPublicKey` from RFC 5480.
const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

const PEM_LABEL_EC_PRIVATE_KEY: &str = "EC PRIVATE KEY";
const PEM_LABEL_PRIVATE_KEY: &str = "PRIVATE KEY";
const PEM_LABEL_PUBLIC_KEY: &str = "PUBLIC KEY";

// PRIVATE KEYS
// ================================================================================================

/// Parses a DER-encoded SEC1 or PKCS#8 elliptic-curve private key.
pub fn parse_private_key(der: &[u8]) -> Result<SecretKey, EciesError> {
    match EcPrivateKey::from_der(der) {
        Ok(key) => {
            let oid = key.parameters.and_then(|params| params.named_curve()).ok_or_else(|| {
                debug!("SEC1 private key carries no named curve");
                EciesError::KeyParseFailed
            })?;
            secret_key_on(curve_from_oid(oid)?, key.private_key)
        },
        Err(_) => parse_pkcs8_private_key(der),
    }
}

/// Parses a PEM-encoded private key with an `EC PRIVATE KEY` or `PRIVATE KEY` label.
pub fn parse_private_key_pem(pem: &str) -> Result<SecretKey, EciesError> {
    let (label, der) = decode_pem(pem)?;
    let der = Zeroizing::new(der);

    match label {
        PEM_LABEL_EC_PRIVATE_KEY | PEM_LABEL_PRIVATE_KEY => parse_private_key(&der),
        _ => {
            debug!(label, "unexpected PEM label for a private key");
            Err(EciesError::KeyParseFailed)
        },
    }
}

fn parse_pkcs8_private_key(der: &[u8]) -> Result<SecretKey, EciesError> {
    let info = pkcs8::PrivateKeyInfo::from_der(der).map_err(|_| EciesError::KeyParseFailed)?;
    if info.algorithm.oid != OID_EC_PUBLIC_KEY {
        debug!(oid = %info.algorithm.oid, "PKCS#8 key is not an elliptic-curve key");
        return Err(EciesError::KeyParseFailed);
    }

    let outer = info
        .algorithm
        .parameters_oid()
        .map_err(|_| EciesError::KeyParseFailed)
        .and_then(curve_from_oid)?;
    let inner = EcPrivateKey::from_der(info.private_key).map_err(|_| EciesError::KeyParseFailed)?;

    // the inner structure may repeat the curve; if it does it has to agree
    if let Some(oid) = inner.parameters.and_then(|params| params.named_curve()) {
        if curve_from_oid(oid)? != outer {
            debug!(%outer, "PKCS#8 key names two different curves");
            return Err(EciesError::CurveMismatch);
        }
    }

    secret_key_on(outer, inner.private_key)
}

fn secret_key_on(curve: Curve, scalar: &[u8]) -> Result<SecretKey, EciesError> {
    SecretKey::from_bytes(curve, scalar).map_err(|_| EciesError::KeyParseFailed)
}

// PUBLIC KEYS
// ================================================================================================

/// Parses a DER-encoded PKIX `SubjectPublicKeyInfo` holding an elliptic-curve key.
pub fn parse_public_key(der: &[u8]) -> Result<PublicKey, EciesError> {
    let spki = SubjectPublicKeyInfoRef::from_der(der).map_err(|_| EciesError::KeyParseFailed)?;
    if spki.algorithm.oid != OID_EC_PUBLIC_KEY {
        debug!(oid = %spki.algorithm.oid, "public key is not an elliptic-curve key");
        return Err(EciesError::KeyParseFailed);
    }

    let curve = spki
        .algorithm
        .parameters_oid()
        .map_err(|_| EciesError::KeyParseFailed)
        .and_then(curve_from_oid)?;
    let point = spki.subject_public_key.as_bytes().ok_or(EciesError::KeyParseFailed)?;

    match curve {
        Curve::P256 => point_on::<p256::NistP256>(point).map(PublicKey::P256),
        Curve::P384 => point_on::<p384::NistP384>(point).map(PublicKey::P384),
        Curve::Secp256k1 => point_on::<k256::Secp256k1>(point).map(PublicKey::Secp256k1),
        Curve::Sm2 => point_on::<sm2::Sm2>(point).map(PublicKey::Sm2),
    }
}

/// Parses a PEM-encoded `PUBLIC KEY`.
pub fn parse_public_key_pem(pem: &str) -> Result<PublicKey, EciesError> {
    let (label, der) = decode_pem(pem)?;
    if label != PEM_LABEL_PUBLIC_KEY {
        debug!(label, "unexpected PEM label for a public key");
        return Err(EciesError::KeyParseFailed);
    }
    parse_public_key(&der)
}

fn point_on<C>(bytes: &[u8]) -> Result<elliptic_curve::PublicKey<C>, EciesError>
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    elliptic_curve::PublicKey::<C>::from_sec1_bytes(bytes).map_err(|_| EciesError::KeyParseFailed)
}

// HELPERS
// ================================================================================================

fn curve_from_oid(oid: ObjectIdentifier) -> Result<Curve, EciesError> {
    Curve::from_oid(oid).ok_or_else(|| {
        debug!(%oid, "unsupported named curve");
        EciesError::KeyParseFailed
    })
}

fn decode_pem(pem: &str) -> Result<(&'static str, Vec<u8>), EciesError> {
    let (label, der) =
        pem_rfc7468::decode_vec(pem.as_bytes()).map_err(|_| EciesError::KeyParseFailed)?;

    let label = [PEM_LABEL_EC_PRIVATE_KEY, PEM_LABEL_PRIVATE_KEY, PEM_LABEL_PUBLIC_KEY]
        .into_iter()
        .find(|known| *known == label)
        .ok_or_else(|| {
            debug!(label, "unsupported PEM label");
            EciesError::KeyParseFailed
        })?;

    Ok((label, der))
}
