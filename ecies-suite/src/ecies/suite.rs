use core::fmt;

use hmac::digest::{Digest, core_api::BlockSizeUser};
use sha2::Sha256;
use sm3::Sm3;

use crate::{
    cipher::{Aes256Cfb, Sm4Cfb, SymmetricCipher},
    keys::PointEncoding,
};

// CIPHER SUITE
// ================================================================================================

/// Hash function and symmetric cipher pair used by one ECIES operation.
///
/// The envelope does not record which suite produced it. Sender and recipient must agree on the
/// suite out of band; decrypting with the wrong one fails the tag check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CipherSuite {
    /// HKDF/HMAC over SHA-256 with AES-256 in CFB mode.
    #[default]
    Aes256CfbSha256,
    /// HKDF/HMAC over SM3 with SM4 in CFB mode.
    Sm4CfbSm3,
}

impl CipherSuite {
    pub const ALL: [CipherSuite; 2] = [CipherSuite::Aes256CfbSha256, CipherSuite::Sm4CfbSm3];

    pub fn name(self) -> &'static str {
        match self {
            CipherSuite::Aes256CfbSha256 => "AES-256-CFB/SHA-256",
            CipherSuite::Sm4CfbSm3 => "SM4-CFB/SM3",
        }
    }

    /// Length of the MAC tag appended to every envelope.
    pub fn tag_len(self) -> usize {
        match self {
            CipherSuite::Aes256CfbSha256 => crate::mac::tag_len::<Sha256>(),
            CipherSuite::Sm4CfbSm3 => crate::mac::tag_len::<Sm3>(),
        }
    }

    /// Length of the derived symmetric encryption key.
    pub fn key_len(self) -> usize {
        match self {
            CipherSuite::Aes256CfbSha256 => Aes256Cfb::KEY_SIZE,
            CipherSuite::Sm4CfbSm3 => Sm4Cfb::KEY_SIZE,
        }
    }

    /// Number of bytes the symmetric ciphertext adds to the plaintext (the IV).
    pub fn cipher_overhead(self) -> usize {
        match self {
            CipherSuite::Aes256CfbSha256 => Aes256Cfb::OVERHEAD,
            CipherSuite::Sm4CfbSm3 => Sm4Cfb::OVERHEAD,
        }
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// TYPE-LEVEL SUITES
// ================================================================================================

/// Compile-time description of a cipher suite, consumed by the generic ECIES pipeline.
pub(crate) trait Suite {
    const ID: CipherSuite;
    type Hash: Digest + BlockSizeUser + Clone;
    type Cipher: SymmetricCipher;
}

pub(crate) struct AesSha256;

impl Suite for AesSha256 {
    const ID: CipherSuite = CipherSuite::Aes256CfbSha256;
    type Hash = Sha256;
    type Cipher = Aes256Cfb;
}

pub(crate) struct Sm4Sm3;

impl Suite for Sm4Sm3 {
    const ID: CipherSuite = CipherSuite::Sm4CfbSm3;
    type Hash = Sm3;
    type Cipher = Sm4Cfb;
}

// PARAMETERS
// ================================================================================================

/// Per-call configuration of an encryption.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncryptionParams {
    pub suite: CipherSuite,
    pub point_encoding: PointEncoding,
}

impl EncryptionParams {
    pub fn new(suite: CipherSuite) -> Self {
        Self { suite, ..Self::default() }
    }

    pub fn with_suite(mut self, suite: CipherSuite) -> Self {
        self.suite = suite;
        self
    }

    /// Sets the SEC1 form used to write the ephemeral public key.
    pub fn with_point_encoding(mut self, point_encoding: PointEncoding) -> Self {
        self.point_encoding = point_encoding;
        self
    }
}

/// Optional context bound into an envelope.
///
/// `s1` is used as the HKDF salt and `s2` is appended to the MAC input. Neither is transmitted;
/// the recipient must supply the same values to decrypt.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SharedInfo<'a> {
    pub s1: &'a [u8],
    pub s2: &'a [u8],
}

impl<'a> SharedInfo<'a> {
    pub fn new(s1: &'a [u8], s2: &'a [u8]) -> Self {
        Self { s1, s2 }
    }
}
