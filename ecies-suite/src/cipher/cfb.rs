//! Full-block cipher feedback (CFB-128) mode with a random IV carried in front of the payload.
//!
//! Output layout is `IV || CFB(key, IV, plaintext)`, so the ciphertext is exactly one block
//! longer than the plaintext and no padding is involved.
//!
//! The block cipher must wipe its key schedule on drop, and the CFB state is wiped with it.

use alloc::vec::Vec;
use core::marker::PhantomData;

use aes::Aes256;
use cfb_mode::{Decryptor, Encryptor};
use cipher::{
    AsyncStreamCipher, BlockCipher, BlockEncryptMut, BlockSizeUser, KeyInit, KeyIvInit,
    KeySizeUser, typenum::Unsigned,
};
use rand::{CryptoRng, RngCore};
use sm4::Sm4;
use zeroize::ZeroizeOnDrop;

use super::{CipherError, SymmetricCipher};

/// AES-256 in CFB mode.
pub type Aes256Cfb = Cfb<Aes256>;

/// SM4 in CFB mode.
pub type Sm4Cfb = Cfb<Sm4>;

/// CFB mode over the block cipher `B`.
pub struct Cfb<B> {
    _phantom: PhantomData<B>,
}

impl<B> Cfb<B>
where
    B: BlockEncryptMut + BlockCipher + KeyInit + ZeroizeOnDrop,
{
    const BLOCK_SIZE: usize = <<B as BlockSizeUser>::BlockSize as Unsigned>::USIZE;

    fn check_key(key: &[u8]) -> Result<(), CipherError> {
        if key.len() != Self::KEY_SIZE {
            return Err(CipherError::InvalidKeyLength {
                expected: Self::KEY_SIZE,
                actual: key.len(),
            });
        }
        Ok(())
    }
}

impl<B> SymmetricCipher for Cfb<B>
where
    B: BlockEncryptMut + BlockCipher + KeyInit + ZeroizeOnDrop,
{
    const KEY_SIZE: usize = <<B as KeySizeUser>::KeySize as Unsigned>::USIZE;
    const OVERHEAD: usize = Self::BLOCK_SIZE;

    fn encrypt<R: CryptoRng + RngCore>(
        key: &[u8],
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        Self::check_key(key)?;

        let mut output = vec![0u8; Self::BLOCK_SIZE + plaintext.len()];
        let (iv, payload) = output.split_at_mut(Self::BLOCK_SIZE);
        rng.fill_bytes(iv);
        payload.copy_from_slice(plaintext);

        let cipher = Encryptor::<B>::new_from_slices(key, iv).map_err(|_| {
            CipherError::InvalidKeyLength { expected: Self::KEY_SIZE, actual: key.len() }
        })?;
        cipher.encrypt(payload);

        Ok(output)
    }

    fn decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        Self::check_key(key)?;

        if ciphertext.len() < Self::BLOCK_SIZE {
            return Err(CipherError::CiphertextTooShort {
                min: Self::BLOCK_SIZE,
                actual: ciphertext.len(),
            });
        }

        let (iv, payload) = ciphertext.split_at(Self::BLOCK_SIZE);
        let mut plaintext = payload.to_vec();

        let cipher = Decryptor::<B>::new_from_slices(key, iv).map_err(|_| {
            CipherError::InvalidKeyLength { expected: Self::KEY_SIZE, actual: key.len() }
        })?;
        cipher.decrypt(&mut plaintext);

        Ok(plaintext)
    }
}
