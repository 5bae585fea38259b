//! HMAC tagging of the symmetric ciphertext together with the shared info `s2`.

use alloc::vec::Vec;

use hmac::{
    Mac, SimpleHmac,
    digest::{Digest, core_api::BlockSizeUser},
};

use crate::ecies::EciesError;

/// Returns the length in bytes of tags produced with the hash `H`.
pub fn tag_len<H: Digest>() -> usize {
    <H as Digest>::output_size()
}

/// Computes `HMAC_H(mac_key, ciphertext || shared_info)`.
pub fn compute_tag<H>(
    mac_key: &[u8],
    ciphertext: &[u8],
    shared_info: &[u8],
) -> Result<Vec<u8>, EciesError>
where
    H: Digest + BlockSizeUser + Clone,
{
    let mac = keyed::<H>(mac_key, ciphertext, shared_info)?;
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Recomputes the tag over `ciphertext || shared_info` and compares it to `tag` in constant time.
pub fn verify_tag<H>(
    mac_key: &[u8],
    ciphertext: &[u8],
    shared_info: &[u8],
    tag: &[u8],
) -> Result<(), EciesError>
where
    H: Digest + BlockSizeUser + Clone,
{
    let mac = keyed::<H>(mac_key, ciphertext, shared_info)?;
    mac.verify_slice(tag).map_err(|_| EciesError::TagMismatch)
}

fn keyed<H>(
    mac_key: &[u8],
    ciphertext: &[u8],
    shared_info: &[u8],
) -> Result<SimpleHmac<H>, EciesError>
where
    H: Digest + BlockSizeUser + Clone,
{
    let mut mac = <SimpleHmac<H> as Mac>::new_from_slice(mac_key)
        .map_err(|_| EciesError::KeyDerivationFailed)?;
    mac.update(ciphertext);
    mac.update(shared_info);
    Ok(mac)
}
