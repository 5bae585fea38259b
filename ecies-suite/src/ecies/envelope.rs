//! Layout of an ECIES envelope: `R || EM || D`.
//!
//! `R` is the SEC1-encoded ephemeral public key, `EM` the symmetric ciphertext and `D` the MAC
//! tag over `EM || s2`.

use alloc::vec::Vec;

use tracing::debug;

use super::{CipherSuite, EciesError};
use crate::keys::{Curve, PointEncoding};

/// Borrowed view of the three regions of an envelope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Envelope<'a> {
    pub ephemeral_key: &'a [u8],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Validates the shape of `bytes` and splits it into its regions.
    ///
    /// Only the tag byte and the total length are inspected; the point itself is decoded later.
    pub fn split(bytes: &'a [u8], field_len: usize, tag_len: usize) -> Result<Self, EciesError> {
        let first_byte = *bytes.first().ok_or_else(|| {
            debug!("rejecting empty ciphertext");
            EciesError::EmptyCiphertext
        })?;

        let encoding = PointEncoding::from_tag(first_byte).ok_or_else(|| {
            debug!(first_byte, "rejecting ciphertext with invalid first byte");
            EciesError::InvalidFirstByte(first_byte)
        })?;

        let point_len = encoding.encoded_len(field_len);
        let min = point_len + tag_len + 1;
        if bytes.len() < min {
            debug!(first_byte, len = bytes.len(), min, "rejecting truncated ciphertext");
            return Err(EciesError::InvalidCiphertextLength { first_byte, len: bytes.len(), min });
        }

        let (ephemeral_key, rest) = bytes.split_at(point_len);
        let (ciphertext, tag) = rest.split_at(rest.len() - tag_len);
        debug_assert!(!ciphertext.is_empty());

        Ok(Self { ephemeral_key, ciphertext, tag })
    }

    /// Concatenates the regions into the wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(self.ephemeral_key.len() + self.ciphertext.len() + self.tag.len());
        out.extend_from_slice(self.ephemeral_key);
        out.extend_from_slice(self.ciphertext);
        out.extend_from_slice(self.tag);
        out
    }
}

/// Smallest envelope length that passes shape validation for the given parameters.
pub fn min_len(curve: Curve, suite: CipherSuite, encoding: PointEncoding) -> usize {
    curve.point_len(encoding) + suite.tag_len() + 1
}

/// Exact length of the envelope produced when encrypting `plaintext_len` bytes.
pub fn expected_len(
    curve: Curve,
    suite: CipherSuite,
    encoding: PointEncoding,
    plaintext_len: usize,
) -> usize {
    curve.point_len(encoding) + suite.cipher_overhead() + plaintext_len + suite.tag_len()
}
