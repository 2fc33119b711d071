//! # PSS Padding (EMSA-PSS, RFC 8017 §9.1)
//!
//! Padding is applied as its own step, separate from the raw RSA transform.
//! The signer pads the ciphertext digest into a modulus-sized block and then
//! runs a raw private-key operation over it. The verifier runs the raw
//! public-key operation and checks the recovered block here.
//!
//! ## Salt Convention
//!
//! - Signing uses a fresh random salt, digest-length by default.
//! - Verification derives the salt length from the block itself, so blocks
//!   signed with any salt length are accepted.

use super::digest::{mgf1_xor, MessageDigest, DIGEST_LENGTH};
use super::errors::CryptoError;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Digest;
use subtle::ConstantTimeEq;

/// Trailer byte closing every encoded block.
const TRAILER: u8 = 0xBC;

/// Separator between the zero padding and the salt inside DB.
const SEPARATOR: u8 = 0x01;

/// Salt length used when producing a PSS block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaltLength {
    /// Salt as long as the digest
    #[default]
    Digest,
    /// Largest salt the modulus allows
    Max,
}

/// EMSA-PSS encoder/verifier for one modulus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PssPadding {
    modulus_bits: usize,
    salt_length: SaltLength,
}

impl PssPadding {
    /// Padding sized for a key with `modulus_bits` bits.
    #[must_use]
    pub fn new(modulus_bits: usize, salt_length: SaltLength) -> Self {
        Self {
            modulus_bits,
            salt_length,
        }
    }

    /// Size of the padded block: the modulus size in bytes.
    #[must_use]
    pub fn block_len(&self) -> usize {
        self.modulus_bits.div_ceil(8)
    }

    fn em_bits(&self) -> usize {
        self.modulus_bits.saturating_sub(1)
    }

    fn em_len(&self) -> usize {
        self.em_bits().div_ceil(8)
    }

    /// Bits of the first EM byte that must be zero so EM stays below the modulus.
    fn top_mask(&self) -> u8 {
        let zero_bits = 8 * self.em_len() - self.em_bits();
        0xFF >> zero_bits
    }

    /// Pad `digest` with a salt drawn from the thread RNG.
    pub fn pad(&self, digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.pad_with_rng(digest, &mut rand::thread_rng())
    }

    /// Pad `digest` with a salt drawn from `rng`.
    ///
    /// The returned block is exactly [`block_len`](Self::block_len) bytes.
    pub fn pad_with_rng<R: RngCore + CryptoRng>(
        &self,
        digest: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>, CryptoError> {
        if digest.len() != DIGEST_LENGTH {
            return Err(CryptoError::PaddingFailed(format!(
                "digest is {} bytes, expected {DIGEST_LENGTH}",
                digest.len()
            )));
        }

        let em_len = self.em_len();
        let salt_len = match self.salt_length {
            SaltLength::Digest => DIGEST_LENGTH,
            SaltLength::Max => em_len.saturating_sub(DIGEST_LENGTH + 2),
        };
        if em_len < DIGEST_LENGTH + salt_len + 2 {
            return Err(CryptoError::PaddingFailed(format!(
                "{}-bit modulus too small for PSS with {salt_len}-byte salt",
                self.modulus_bits
            )));
        }

        let mut salt = vec![0u8; salt_len];
        rng.fill_bytes(&mut salt);
        let h = m_prime_hash(digest, &salt);

        // DB = PS || 0x01 || salt
        let db_len = em_len - DIGEST_LENGTH - 1;
        let mut db = vec![0u8; db_len];
        db[db_len - salt_len - 1] = SEPARATOR;
        db[db_len - salt_len..].copy_from_slice(&salt);
        mgf1_xor(&mut db, &h);
        db[0] &= self.top_mask();

        let mut block = vec![0u8; self.block_len() - em_len];
        block.extend_from_slice(&db);
        block.extend_from_slice(&h);
        block.push(TRAILER);
        Ok(block)
    }

    /// Check that `block` is a valid PSS encoding of `digest`.
    ///
    /// Returns `false` for any structural or hash mismatch.
    #[must_use]
    pub fn verify(&self, digest: &[u8], block: &[u8]) -> bool {
        if digest.len() != DIGEST_LENGTH || block.len() != self.block_len() {
            return false;
        }

        let em_len = self.em_len();
        if em_len < DIGEST_LENGTH + 2 {
            return false;
        }

        let (leading, em) = block.split_at(block.len() - em_len);
        if leading.iter().any(|b| *b != 0) || em[em_len - 1] != TRAILER {
            return false;
        }

        let db_len = em_len - DIGEST_LENGTH - 1;
        let (masked_db, rest) = em.split_at(db_len);
        let h = &rest[..DIGEST_LENGTH];

        let mask = self.top_mask();
        if masked_db[0] & !mask != 0 {
            return false;
        }

        let mut db = masked_db.to_vec();
        mgf1_xor(&mut db, h);
        db[0] &= mask;

        // Salt length is whatever follows the first non-zero byte
        let Some(separator) = db.iter().position(|b| *b != 0) else {
            return false;
        };
        if db[separator] != SEPARATOR {
            return false;
        }
        let salt = &db[separator + 1..];

        let expected = m_prime_hash(digest, salt);
        expected.as_slice().ct_eq(h).into()
    }
}

/// H = Hash(0x00 * 8 || mHash || salt)
fn m_prime_hash(digest: &[u8], salt: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = MessageDigest::new();
    hasher.update([0u8; 8]);
    hasher.update(digest);
    hasher.update(salt);
    hasher.finalize().into()
}
