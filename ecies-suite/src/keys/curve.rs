use core::fmt;

use spki::ObjectIdentifier;

// CONSTANTS
// ================================================================================================

/// Tag byte of a compressed SEC1 point whose y-coordinate is even.
pub const TAG_COMPRESSED_EVEN_Y: u8 = 0x02;

/// Tag byte of a compressed SEC1 point whose y-coordinate is odd.
pub const TAG_COMPRESSED_ODD_Y: u8 = 0x03;

/// Tag byte of an uncompressed SEC1 point.
pub const TAG_UNCOMPRESSED: u8 = 0x04;

const OID_SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const OID_SECP256K1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");
const OID_SM2P256V1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.156.10197.1.301");

// CURVE
// ================================================================================================

/// Named elliptic curves on which keys can be used for ECIES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// NIST P-256 (secp256r1).
    P256,
    /// NIST P-384 (secp384r1).
    P384,
    /// secp256k1.
    Secp256k1,
    /// SM2 recommended curve (sm2p256v1).
    Sm2,
}

impl Curve {
    /// All supported curves.
    pub const ALL: [Curve; 4] = [Curve::P256, Curve::P384, Curve::Secp256k1, Curve::Sm2];

    /// Returns the bit size of the curve's base field.
    pub const fn bits(self) -> usize {
        match self {
            Curve::P256 | Curve::Secp256k1 | Curve::Sm2 => 256,
            Curve::P384 => 384,
        }
    }

    /// Returns the number of bytes in a serialized field element, i.e. `ceil(bits / 8)`.
    pub const fn field_len(self) -> usize {
        self.bits().div_ceil(8)
    }

    /// Returns the length of a SEC1-encoded point on this curve, including the tag byte.
    pub const fn point_len(self, encoding: PointEncoding) -> usize {
        encoding.encoded_len(self.field_len())
    }

    pub fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::Secp256k1 => "secp256k1",
            Curve::Sm2 => "SM2",
        }
    }

    /// Returns the named-curve object identifier used in SEC1 and PKIX key encodings.
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            Curve::P256 => OID_SECP256R1,
            Curve::P384 => OID_SECP384R1,
            Curve::Secp256k1 => OID_SECP256K1,
            Curve::Sm2 => OID_SM2P256V1,
        }
    }

    /// Looks up the curve identified by a named-curve object identifier.
    pub fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        Curve::ALL.into_iter().find(|curve| curve.oid() == oid)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// POINT ENCODING
// ================================================================================================

/// SEC1 octet-string form used for the ephemeral public key in an envelope.
///
/// Both forms are self-describing through their leading tag byte, so decryption accepts either
/// regardless of what the encryptor chose.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointEncoding {
    /// `0x02`/`0x03` followed by the x-coordinate.
    Compressed,
    /// `0x04` followed by the x- and y-coordinates.
    #[default]
    Uncompressed,
}

impl PointEncoding {
    /// Determines the encoding from the leading tag byte of a SEC1 point.
    ///
    /// Returns `None` for the identity tag, hybrid tags and anything unrecognized.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TAG_COMPRESSED_EVEN_Y | TAG_COMPRESSED_ODD_Y => Some(PointEncoding::Compressed),
            TAG_UNCOMPRESSED => Some(PointEncoding::Uncompressed),
            _ => None,
        }
    }

    /// Returns the encoded point length, tag byte included, for a field of `field_len` bytes.
    pub const fn encoded_len(self, field_len: usize) -> usize {
        match self {
            PointEncoding::Compressed => 1 + field_len,
            PointEncoding::Uncompressed => 1 + 2 * field_len,
        }
    }

    pub(crate) const fn is_compressed(self) -> bool {
        matches!(self, PointEncoding::Compressed)
    }
}
