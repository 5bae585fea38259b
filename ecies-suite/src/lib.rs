#![no_std]

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod cipher;
pub mod ecdh;
pub mod ecies;
pub mod kdf;
pub mod keys;
pub mod mac;

// RE-EXPORTS
// ================================================================================================

pub use ecies::{
    CipherSuite, EciesError, EncryptionParams, SharedInfo, decrypt, encrypt_with_rng, envelope,
};
#[cfg(feature = "std")]
pub use ecies::encrypt;
pub use keys::{
    Curve, PointEncoding, PublicKey, SecretKey, parse_private_key, parse_private_key_pem,
    parse_public_key, parse_public_key_pem,
};
pub use zeroize::Zeroizing;

// CONSTANTS
// ================================================================================================

/// Number of bytes in the MAC key derived for every cipher suite.
pub const MAC_KEY_SIZE: usize = 32;

// TESTS
// ================================================================================================
