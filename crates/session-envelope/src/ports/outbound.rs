//! # Outbound Ports (Driven Ports / SPI)
//!
//! The asymmetric-key primitive the envelope is built on. Keys are read-only
//! per call; implementations must not cache or mutate key material.

use crate::domain::errors::CryptoError;
use zeroize::Zeroizing;

/// Digest length used by OAEP padding (SHA-1).
pub const OAEP_DIGEST_LENGTH: usize = 20;

/// Largest cleartext OAEP can carry under a key of `key_size` bytes.
#[must_use]
pub fn oaep_capacity(key_size: usize) -> usize {
    key_size.saturating_sub(2 * OAEP_DIGEST_LENGTH + 2)
}

/// Public half of an asymmetric key.
pub trait PublicKeyPrimitive {
    /// Modulus size in bytes.
    fn key_size(&self) -> usize;

    /// Modulus size in bits.
    fn modulus_bits(&self) -> usize;

    /// OAEP-encrypt `cleartext` for the holder of the private key.
    ///
    /// # Errors
    /// * `CryptoError::EncryptionFailed` - cleartext exceeds [`oaep_capacity`]
    fn public_encrypt_oaep(&self, cleartext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Raw public-key transform, no padding applied.
    ///
    /// `block` must be exactly [`key_size`](Self::key_size) bytes; the output is too.
    fn public_decrypt_raw(&self, block: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Private half of an asymmetric key.
pub trait PrivateKeyPrimitive {
    /// Modulus size in bytes.
    fn key_size(&self) -> usize;

    /// Modulus size in bits.
    fn modulus_bits(&self) -> usize;

    /// OAEP-decrypt `ciphertext`.
    ///
    /// # Errors
    /// * `CryptoError::DecryptionFailed` - unpadding failed (wrong key, corruption, tampering)
    fn private_decrypt_oaep(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError>;

    /// Raw private-key transform, no padding applied.
    ///
    /// `block` must be exactly [`key_size`](Self::key_size) bytes; the output is too.
    fn private_encrypt_raw(&self, block: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
