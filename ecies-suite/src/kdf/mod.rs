//! HKDF-based derivation of the encryption and MAC keys from an ECDH shared secret.

use alloc::vec::Vec;

use hkdf::SimpleHkdf;
use hmac::digest::{Digest, core_api::BlockSizeUser};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{MAC_KEY_SIZE, ecies::EciesError};

/// Encryption key and MAC key derived for a single ECIES operation.
///
/// Both keys are wiped when the value goes out of scope.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    encryption_key: Vec<u8>,
    mac_key: Vec<u8>,
}

impl DerivedKeys {
    pub fn encryption_key(&self) -> &[u8] {
        &self.encryption_key
    }

    pub fn mac_key(&self) -> &[u8] {
        &self.mac_key
    }
}

impl core::fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DerivedKeys")
            .field("encryption_key_len", &self.encryption_key.len())
            .field("mac_key_len", &self.mac_key.len())
            .finish()
    }
}

/// Derives `enc_key_len` bytes of encryption key followed by [MAC_KEY_SIZE] bytes of MAC key.
///
/// Runs HKDF with `shared_secret` as input keying material, `salt` as the extract salt and an
/// empty info string. An empty salt is equivalent to a hash-length string of zeros.
pub fn derive_keys<H>(
    shared_secret: &[u8],
    salt: &[u8],
    enc_key_len: usize,
) -> Result<DerivedKeys, EciesError>
where
    H: Digest + BlockSizeUser + Clone,
{
    let salt = if salt.is_empty() { None } else { Some(salt) };
    let hkdf = SimpleHkdf::<H>::new(salt, shared_secret);

    let mut okm = Zeroizing::new(vec![0u8; enc_key_len + MAC_KEY_SIZE]);
    hkdf.expand(&[], &mut okm).map_err(|_| EciesError::KeyDerivationFailed)?;

    let (encryption_key, mac_key) = okm.split_at(enc_key_len);
    Ok(DerivedKeys {
        encryption_key: encryption_key.to_vec(),
        mac_key: mac_key.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use sha2::Sha256;
    use sm3::Sm3;

    use super::*;

    #[test]
    fn hkdf_sha256_known_answer() {
        // RFC 5869, test case 3: zero-length salt and info
        let ikm = [0x0b; 22];
        let expected = hex::decode(
            "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d9d201395faa4b61a96c8",
        )
        .unwrap();

        let keys = derive_keys::<Sha256>(&ikm, &[], 32).unwrap();
        assert_eq!(keys.encryption_key(), &expected[..32]);
        assert_eq!(&keys.mac_key()[..10], &expected[32..]);
        assert_eq!(keys.mac_key().len(), MAC_KEY_SIZE);
    }

    #[test]
    fn derivation_is_deterministic() {
        let z = [0x42; 32];
        let a = derive_keys::<Sm3>(&z, b"salt", 16).unwrap();
        let b = derive_keys::<Sm3>(&z, b"salt", 16).unwrap();

        assert_eq!(a.encryption_key(), b.encryption_key());
        assert_eq!(a.mac_key(), b.mac_key());
        assert_eq!(a.encryption_key().len(), 16);
    }

    #[test]
    fn salt_and_hash_change_output() {
        let z = [0x42; 32];
        let base = derive_keys::<Sha256>(&z, &[], 16).unwrap();
        let salted = derive_keys::<Sha256>(&z, b"s1", 16).unwrap();
        let sm3 = derive_keys::<Sm3>(&z, &[], 16).unwrap();

        assert_ne!(base.encryption_key(), salted.encryption_key());
        assert_ne!(base.encryption_key(), sm3.encryption_key());
    }

    #[test]
    fn encryption_key_is_a_prefix_of_longer_output() {
        // the encryption key is read first, so a 16 byte key is a prefix of a 32 byte one
        let z = [7u8; 32];
        let short = derive_keys::<Sha256>(&z, &[], 16).unwrap();
        let long = derive_keys::<Sha256>(&z, &[], 32).unwrap();

        assert_eq!(short.encryption_key(), &long.encryption_key()[..16]);
    }

    #[test]
    fn oversized_output_is_an_error() {
        // HKDF-SHA256 can produce at most 255 * 32 bytes
        assert_matches!(
            derive_keys::<Sha256>(&[1; 32], &[], 255 * 32),
            Err(EciesError::KeyDerivationFailed)
        );
    }
}
