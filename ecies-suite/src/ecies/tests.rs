use alloc::vec::Vec;

use assert_matches::assert_matches;
use p256::NistP256;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rstest::rstest;
use sha2::Sha256;

use super::*;
use crate::{
    ecdh::{Ecdh, KeyAgreementScheme},
    kdf::derive_keys,
    keys::{Curve, PointEncoding, TAG_UNCOMPRESSED},
    mac::compute_tag,
};

const TAG_LEN: usize = 32;

fn key_pair(curve: Curve, seed: u8) -> (SecretKey, PublicKey) {
    let mut rng = ChaCha20Rng::from_seed([seed; 32]);
    let secret_key = SecretKey::with_rng(curve, &mut rng);
    let public_key = secret_key.public_key();
    (secret_key, public_key)
}

fn seal(
    public_key: &PublicKey,
    plaintext: &[u8],
    suite: CipherSuite,
    encoding: PointEncoding,
    info: SharedInfo<'_>,
) -> Vec<u8> {
    let mut rng = ChaCha20Rng::from_seed([0xee; 32]);
    let params = EncryptionParams::new(suite).with_point_encoding(encoding);
    public_key.encrypt_with_rng(&mut rng, plaintext, &params, info).unwrap()
}

// ROUND TRIPS
// ================================================================================================

#[rstest]
fn round_trip(
    #[values(Curve::P256, Curve::P384, Curve::Secp256k1, Curve::Sm2)] curve: Curve,
    #[values(CipherSuite::Aes256CfbSha256, CipherSuite::Sm4CfbSm3)] suite: CipherSuite,
    #[values(PointEncoding::Compressed, PointEncoding::Uncompressed)] encoding: PointEncoding,
    #[values(&b""[..], &b"helloworld"[..])] plaintext: &[u8],
) {
    let (secret_key, public_key) = key_pair(curve, 1);

    let envelope = seal(&public_key, plaintext, suite, encoding, SharedInfo::default());
    assert_eq!(envelope.len(), envelope::expected_len(curve, suite, encoding, plaintext.len()));
    assert_eq!(PointEncoding::from_tag(envelope[0]), Some(encoding));

    let decrypted = decrypt(&secret_key, &envelope, suite).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[cfg(feature = "std")]
#[test]
fn os_rng_round_trip() {
    let secret_key = SecretKey::new(Curve::Sm2);
    let public_key = secret_key.public_key();

    let envelope = encrypt(&public_key, b"helloworld", CipherSuite::Sm4CfbSm3).unwrap();
    assert_eq!(decrypt(&secret_key, &envelope, CipherSuite::Sm4CfbSm3).unwrap(), b"helloworld");
}

#[rstest]
#[case(Curve::P256, 65)]
#[case(Curve::P384, 97)]
#[case(Curve::Secp256k1, 65)]
#[case(Curve::Sm2, 65)]
fn helloworld_envelope_length(#[case] curve: Curve, #[case] point_len: usize) {
    let (secret_key, public_key) = key_pair(curve, 2);
    let mut rng = ChaCha20Rng::from_seed([2; 32]);

    let envelope =
        encrypt_with_rng(&mut rng, &public_key, b"helloworld", CipherSuite::Aes256CfbSha256)
            .unwrap();

    // R || IV || 10 bytes of payload || tag
    assert_eq!(envelope.len(), point_len + 16 + 10 + TAG_LEN);
    assert_eq!(envelope[0], TAG_UNCOMPRESSED);
    assert_eq!(
        decrypt(&secret_key, &envelope, CipherSuite::Aes256CfbSha256).unwrap(),
        b"helloworld"
    );
}

#[test]
fn seeded_rng_gives_identical_envelopes() {
    let (_, public_key) = key_pair(Curve::Secp256k1, 3);

    let encrypt_seeded = |seed: u8| {
        let mut rng = ChaCha20Rng::from_seed([seed; 32]);
        encrypt_with_rng(&mut rng, &public_key, b"deterministic", CipherSuite::Sm4CfbSm3).unwrap()
    };

    assert_eq!(encrypt_seeded(7), encrypt_seeded(7));
    assert_ne!(encrypt_seeded(7), encrypt_seeded(8));
}

#[test]
fn fresh_randomness_per_encryption() {
    let (secret_key, public_key) = key_pair(Curve::P256, 4);
    let mut rng = ChaCha20Rng::from_seed([4; 32]);
    let suite = CipherSuite::Aes256CfbSha256;

    let first = encrypt_with_rng(&mut rng, &public_key, b"same", suite).unwrap();
    let second = encrypt_with_rng(&mut rng, &public_key, b"same", suite).unwrap();

    assert_ne!(first[..65], second[..65]);
    assert_eq!(decrypt(&secret_key, &first, suite).unwrap(), b"same");
    assert_eq!(decrypt(&secret_key, &second, suite).unwrap(), b"same");
}

// BINDING
// ================================================================================================

#[rstest]
#[case(CipherSuite::Aes256CfbSha256, CipherSuite::Sm4CfbSm3)]
#[case(CipherSuite::Sm4CfbSm3, CipherSuite::Aes256CfbSha256)]
fn suite_mismatch_fails_the_tag_check(#[case] sealed: CipherSuite, #[case] opened: CipherSuite) {
    let (secret_key, public_key) = key_pair(Curve::P256, 5);
    let envelope =
        seal(&public_key, b"suite bound", sealed, PointEncoding::Uncompressed, Default::default());

    assert_matches!(decrypt(&secret_key, &envelope, opened), Err(EciesError::TagMismatch));
}

#[test]
fn shared_info_is_bound() {
    let (secret_key, public_key) = key_pair(Curve::Sm2, 6);
    let suite = CipherSuite::Sm4CfbSm3;
    let info = SharedInfo::new(b"s1 context", b"s2 context");

    let envelope = seal(&public_key, b"with context", suite, PointEncoding::Compressed, info);

    assert_eq!(secret_key.decrypt_with_info(&envelope, suite, info).unwrap(), b"with context");
    assert_matches!(
        secret_key.decrypt_with_info(&envelope, suite, SharedInfo::new(b"other", b"s2 context")),
        Err(EciesError::TagMismatch)
    );
    assert_matches!(
        secret_key.decrypt_with_info(&envelope, suite, SharedInfo::new(b"s1 context", b"other")),
        Err(EciesError::TagMismatch)
    );
    assert_matches!(decrypt(&secret_key, &envelope, suite), Err(EciesError::TagMismatch));
}

#[test]
fn wrong_recipient_fails_the_tag_check() {
    let (_, public_key) = key_pair(Curve::P384, 7);
    let (other_secret_key, _) = key_pair(Curve::P384, 8);
    let suite = CipherSuite::Aes256CfbSha256;

    let envelope =
        seal(&public_key, b"for someone else", suite, Default::default(), Default::default());
    assert_matches!(decrypt(&other_secret_key, &envelope, suite), Err(EciesError::TagMismatch));
}

#[test]
fn curve_mismatch_fails() {
    let (_, p256_public) = key_pair(Curve::P256, 9);
    let (p384_secret, _) = key_pair(Curve::P384, 9);
    let (k256_secret, _) = key_pair(Curve::Secp256k1, 9);
    let suite = CipherSuite::Aes256CfbSha256;

    let envelope = seal(&p256_public, b"hello", suite, Default::default(), Default::default());
    assert!(decrypt(&p384_secret, &envelope, suite).is_err());
    assert!(decrypt(&k256_secret, &envelope, suite).is_err());
}

// MALFORMED INPUT
// ================================================================================================

#[rstest]
#[case(Curve::P256)]
#[case(Curve::P384)]
#[case(Curve::Secp256k1)]
#[case(Curve::Sm2)]
fn length_boundaries(#[case] curve: Curve) {
    let (secret_key, _) = key_pair(curve, 10);
    let suite = CipherSuite::Aes256CfbSha256;
    let min = envelope::min_len(curve, suite, PointEncoding::Uncompressed);
    assert_eq!(min, curve.point_len(PointEncoding::Uncompressed) + TAG_LEN + 1);

    let mut short = vec![0u8; min - 1];
    short[0] = TAG_UNCOMPRESSED;
    let err = decrypt(&secret_key, &short, suite).unwrap_err();
    assert!(err.is_malformed());
    assert_matches!(err, EciesError::InvalidCiphertextLength { first_byte: 4, .. });

    // all-zero coordinates pass the shape check but are not a point on the curve
    let mut zero_point = vec![0u8; min];
    zero_point[0] = TAG_UNCOMPRESSED;
    let err = decrypt(&secret_key, &zero_point, suite).unwrap_err();
    assert!(err.is_integrity_failure());
    assert_matches!(err, EciesError::InvalidPoint);
}

#[test]
fn compressed_length_boundary() {
    let (secret_key, _) = key_pair(Curve::P256, 11);
    let suite = CipherSuite::Sm4CfbSm3;

    let mut short = vec![0u8; 33 + TAG_LEN];
    short[0] = 0x03;
    assert_matches!(
        decrypt(&secret_key, &short, suite),
        Err(EciesError::InvalidCiphertextLength { first_byte: 3, len: 65, min: 66 })
    );
}

#[rstest]
#[case(&[0x05; 200])]
#[case(&[0x00; 200])]
#[case(&[0x01])]
fn unknown_first_byte_is_malformed(#[case] ciphertext: &[u8]) {
    let (secret_key, _) = key_pair(Curve::Secp256k1, 12);

    let err = decrypt(&secret_key, ciphertext, CipherSuite::Aes256CfbSha256).unwrap_err();
    assert!(err.is_malformed());
    assert_matches!(err, EciesError::InvalidFirstByte(b) if b == ciphertext[0]);
}

#[test]
fn empty_ciphertext_is_malformed() {
    let (secret_key, _) = key_pair(Curve::P256, 13);
    assert_matches!(
        decrypt(&secret_key, &[], CipherSuite::Sm4CfbSm3),
        Err(EciesError::EmptyCiphertext)
    );
}

#[test]
fn authenticated_short_symmetric_ciphertext_is_rejected() {
    // a correctly tagged envelope whose symmetric part cannot even hold an IV
    let mut rng = ChaCha20Rng::from_seed([14; 32]);
    let recipient = p256::SecretKey::random(&mut rng);

    let (ephemeral_secret, ephemeral_public) =
        Ecdh::<NistP256>::generate_ephemeral_keypair(&mut rng);
    let shared =
        Ecdh::<NistP256>::exchange_ephemeral_static(&ephemeral_secret, &recipient.public_key());
    let keys = derive_keys::<Sha256>(shared.as_bytes(), &[], 32).unwrap();

    let em = [0x42u8; 5];
    let tag = compute_tag::<Sha256>(keys.mac_key(), &em, &[]).unwrap();

    let mut envelope = Ecdh::<NistP256>::encode_ephemeral_public_key(
        &ephemeral_public,
        PointEncoding::Uncompressed,
    );
    envelope.extend_from_slice(&em);
    envelope.extend_from_slice(&tag);

    let secret_key = SecretKey::P256(recipient);
    assert_matches!(
        decrypt(&secret_key, &envelope, CipherSuite::Aes256CfbSha256),
        Err(EciesError::SymmetricCiphertextTooShort)
    );
}

// WIRE FORMAT
// ================================================================================================

#[test]
fn envelope_built_from_primitives_is_accepted() {
    use aes::Aes256;
    use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
    use elliptic_curve::sec1::ToEncodedPoint;
    use hkdf::Hkdf;
    use hmac::{Hmac, Mac};

    let mut rng = ChaCha20Rng::from_seed([15; 32]);
    let recipient = p256::SecretKey::random(&mut rng);
    let ephemeral = p256::SecretKey::random(&mut rng);

    // Z is the x-coordinate as a big-endian integer without leading zeros
    let shared = elliptic_curve::ecdh::diffie_hellman(
        ephemeral.to_nonzero_scalar(),
        recipient.public_key().as_affine(),
    );
    let z: Vec<u8> = shared.raw_secret_bytes().iter().copied().skip_while(|&b| b == 0).collect();

    let mut okm = [0u8; 64];
    Hkdf::<Sha256>::new(Some(&b"salt"[..]), &z).expand(&[], &mut okm).unwrap();
    let (encryption_key, mac_key) = okm.split_at(32);

    let iv = [0x5a; 16];
    let mut payload = b"helloworld".to_vec();
    cfb_mode::Encryptor::<Aes256>::new_from_slices(encryption_key, &iv)
        .unwrap()
        .encrypt(&mut payload);

    let mut em = iv.to_vec();
    em.extend_from_slice(&payload);

    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(mac_key).unwrap();
    mac.update(&em);
    mac.update(b"mac info");
    let tag = mac.finalize().into_bytes();

    let mut envelope = ephemeral.public_key().to_encoded_point(false).as_bytes().to_vec();
    envelope.extend_from_slice(&em);
    envelope.extend_from_slice(&tag);

    let secret_key = SecretKey::P256(recipient);
    let plaintext = secret_key
        .decrypt_with_info(
            &envelope,
            CipherSuite::Aes256CfbSha256,
            SharedInfo::new(b"salt", b"mac info"),
        )
        .unwrap();
    assert_eq!(plaintext, b"helloworld");
}

// PROPERTY TESTS
// ================================================================================================

fn arbitrary_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..300)
}

fn arbitrary_curve() -> impl Strategy<Value = Curve> {
    prop::sample::select(Curve::ALL.to_vec())
}

fn arbitrary_suite() -> impl Strategy<Value = CipherSuite> {
    prop::sample::select(CipherSuite::ALL.to_vec())
}

fn arbitrary_encoding() -> impl Strategy<Value = PointEncoding> {
    prop_oneof![Just(PointEncoding::Compressed), Just(PointEncoding::Uncompressed)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_with_shared_info(
        curve in arbitrary_curve(),
        suite in arbitrary_suite(),
        encoding in arbitrary_encoding(),
        plaintext in arbitrary_bytes(),
        s1 in arbitrary_bytes(),
        s2 in arbitrary_bytes(),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let secret_key = SecretKey::with_rng(curve, &mut rng);
        let info = SharedInfo::new(&s1, &s2);
        let params = EncryptionParams::new(suite).with_point_encoding(encoding);

        let envelope = secret_key
            .public_key()
            .encrypt_with_rng(&mut rng, &plaintext, &params, info)
            .unwrap();
        prop_assert_eq!(envelope.len(), envelope::expected_len(curve, suite, encoding, plaintext.len()));

        let decrypted = secret_key.decrypt_with_info(&envelope, suite, info).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn prop_single_bit_flip_is_rejected(
        curve in arbitrary_curve(),
        suite in arbitrary_suite(),
        encoding in arbitrary_encoding(),
        plaintext in arbitrary_bytes(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let secret_key = SecretKey::with_rng(curve, &mut rng);
        let params = EncryptionParams::new(suite).with_point_encoding(encoding);

        let mut envelope = secret_key
            .public_key()
            .encrypt_with_rng(&mut rng, &plaintext, &params, SharedInfo::default())
            .unwrap();
        let index = position.index(envelope.len());
        envelope[index] ^= 1 << bit;

        let err = decrypt(&secret_key, &envelope, suite).unwrap_err();
        if index < curve.point_len(encoding) {
            prop_assert!(err.is_integrity_failure() || err.is_malformed(), "{:?}", err);
        } else {
            prop_assert_eq!(err, EciesError::TagMismatch);
        }
    }

    #[test]
    fn prop_arbitrary_input_never_panics(
        curve in arbitrary_curve(),
        suite in arbitrary_suite(),
        ciphertext in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let secret_key = SecretKey::with_rng(curve, &mut ChaCha20Rng::from_seed([16; 32]));
        prop_assert!(decrypt(&secret_key, &ciphertext, suite).is_err());
    }
}
