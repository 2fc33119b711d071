//! # RSA Adapter
//!
//! Implements the key primitive ports for the `rsa` crate's key types.
//!
//! ## Parameters
//!
//! - OAEP: SHA-1 with MGF1-SHA-1, the stock OpenSSL OAEP mode
//! - Raw transforms: `rsa::hazmat`, private side blinded with the thread RNG

use crate::domain::errors::CryptoError;
use crate::ports::outbound::{PrivateKeyPrimitive, PublicKeyPrimitive};
use rsa::hazmat::{rsa_decrypt_and_check, rsa_encrypt};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Oaep, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use zeroize::Zeroizing;

fn oaep() -> Oaep {
    Oaep::new::<Sha1>()
}

/// Interpret `block` as a big-endian integer below the modulus.
fn block_to_int(block: &[u8], n: &BigUint, key_size: usize) -> Result<BigUint, CryptoError> {
    if block.len() != key_size {
        return Err(CryptoError::KeySizeMismatch {
            expected: key_size,
            actual: block.len(),
        });
    }

    let value = BigUint::from_bytes_be(block);
    if &value >= n {
        return Err(CryptoError::InvalidInput("block not below modulus".into()));
    }
    Ok(value)
}

/// Left-pad the transform result back out to the modulus size.
fn int_to_block(value: &BigUint, key_size: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut block = vec![0u8; key_size.saturating_sub(bytes.len())];
    block.extend_from_slice(&bytes);
    block
}

impl PublicKeyPrimitive for RsaPublicKey {
    fn key_size(&self) -> usize {
        self.size()
    }

    fn modulus_bits(&self) -> usize {
        self.n().bits()
    }

    fn public_encrypt_oaep(&self, cleartext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.encrypt(&mut rand::thread_rng(), oaep(), cleartext)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
    }

    fn public_decrypt_raw(&self, block: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let input = block_to_int(block, self.n(), self.size())?;
        let output =
            rsa_encrypt(self, &input).map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
        Ok(int_to_block(&output, self.size()))
    }
}

impl PrivateKeyPrimitive for RsaPrivateKey {
    fn key_size(&self) -> usize {
        self.size()
    }

    fn modulus_bits(&self) -> usize {
        self.n().bits()
    }

    fn private_decrypt_oaep(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.decrypt(oaep(), ciphertext)
            .map(Zeroizing::new)
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
    }

    fn private_encrypt_raw(&self, block: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let input = block_to_int(block, self.n(), self.size())?;
        let mut rng = rand::thread_rng();
        let output = rsa_decrypt_and_check(self, Some(&mut rng), &input)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(int_to_block(&output, self.size()))
    }
}
