//! # Crypto Envelope
//!
//! Hybrid encrypt-then-sign over the session wire codec.
//!
//! ## Construction
//!
//! 1. OAEP-encrypt the cleartext under the receiver's public key
//! 2. Digest the ciphertext
//! 3. PSS-pad the digest to the signer's modulus
//! 4. Raw private-key transform of the padded block
//! 5. Frame ciphertext and signature with [`encode_fields`]
//!
//! Steps 3 and 4 stay separate so the padding scheme is explicit: peers
//! that pad and transform independently produce and accept the same blocks.
//!
//! ## Reception
//!
//! [`verify`] and [`open`] are independent. Callers that trust the payload
//! must run both, verify first.

use super::digest::ciphertext_digest;
use super::errors::{CryptoError, SessionError};
use super::pss::{PssPadding, SaltLength};
use crate::ports::outbound::{PrivateKeyPrimitive, PublicKeyPrimitive};
use session_wire::{encode_fields, encoded_len, HeaderCodec, MessageType, SessionMessage};

/// Ciphertext and signature ready for framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedParts {
    /// OAEP ciphertext
    pub ciphertext: Vec<u8>,
    /// Signature over the ciphertext digest
    pub signature: Vec<u8>,
}

/// Run the cryptographic half of construction (steps 1 to 4).
pub fn seal_parts<E, S>(
    cleartext: &[u8],
    encryption_key: &E,
    signing_key: &S,
    salt_length: SaltLength,
) -> Result<SealedParts, CryptoError>
where
    E: PublicKeyPrimitive + ?Sized,
    S: PrivateKeyPrimitive + ?Sized,
{
    let ciphertext = encryption_key.public_encrypt_oaep(cleartext)?;
    let signature = sign_ciphertext(&ciphertext, signing_key, salt_length)?;
    Ok(SealedParts {
        ciphertext,
        signature,
    })
}

fn sign_ciphertext<S: PrivateKeyPrimitive + ?Sized>(
    ciphertext: &[u8],
    signing_key: &S,
    salt_length: SaltLength,
) -> Result<Vec<u8>, CryptoError> {
    let digest = ciphertext_digest(ciphertext);

    let padding = PssPadding::new(signing_key.modulus_bits(), salt_length);
    let block = padding.pad(&digest)?;
    if block.len() != signing_key.key_size() {
        return Err(CryptoError::KeySizeMismatch {
            expected: signing_key.key_size(),
            actual: block.len(),
        });
    }

    signing_key.private_encrypt_raw(&block)
}

/// Seal `cleartext` into a freshly allocated framed buffer.
pub fn seal<E, S, H>(
    cleartext: &[u8],
    encryption_key: &E,
    signing_key: &S,
    message_type: MessageType,
    salt_length: SaltLength,
    codec: &H,
) -> Result<Vec<u8>, SessionError>
where
    E: PublicKeyPrimitive + ?Sized,
    S: PrivateKeyPrimitive + ?Sized,
    H: HeaderCodec + ?Sized,
{
    let parts = seal_parts(cleartext, encryption_key, signing_key, salt_length)?;

    let mut out = vec![0u8; encoded_len(parts.ciphertext.len(), parts.signature.len(), codec)];
    let written = encode_fields(
        &mut out,
        &parts.ciphertext,
        &parts.signature,
        message_type,
        codec,
    )?;
    out.truncate(written);
    Ok(out)
}

/// Seal `cleartext` into a caller-supplied buffer.
///
/// Returns the number of bytes written. Nothing is written unless every step
/// succeeds.
pub fn seal_into<E, S, H>(
    out: &mut [u8],
    cleartext: &[u8],
    encryption_key: &E,
    signing_key: &S,
    message_type: MessageType,
    salt_length: SaltLength,
    codec: &H,
) -> Result<usize, SessionError>
where
    E: PublicKeyPrimitive + ?Sized,
    S: PrivateKeyPrimitive + ?Sized,
    H: HeaderCodec + ?Sized,
{
    let parts = seal_parts(cleartext, encryption_key, signing_key, salt_length)?;
    let written = encode_fields(
        out,
        &parts.ciphertext,
        &parts.signature,
        message_type,
        codec,
    )?;
    Ok(written)
}

/// Authenticate the ciphertext against the sender's public key.
///
/// # Errors
/// * `CryptoError::SignatureInvalid` - on any mismatch, including a signature
///   that is not exactly the key's modulus size
pub fn verify<K: PublicKeyPrimitive + ?Sized>(
    message: &SessionMessage<'_>,
    signing_key: &K,
) -> Result<(), CryptoError> {
    let signature = message.signature();
    if signature.len() != signing_key.key_size() {
        return Err(CryptoError::SignatureInvalid);
    }

    let digest = ciphertext_digest(message.ciphertext());
    let block = signing_key
        .public_decrypt_raw(signature)
        .map_err(|_| CryptoError::SignatureInvalid)?;

    // Salt length is recovered from the block, the configured policy only affects signing
    let padding = PssPadding::new(signing_key.modulus_bits(), SaltLength::Digest);
    if padding.verify(&digest, &block) {
        Ok(())
    } else {
        Err(CryptoError::SignatureInvalid)
    }
}

/// Recover the cleartext into `out`.
///
/// With `out` set to `None`, returns the key's modulus size as an upper bound
/// on the plaintext length, without decrypting.
///
/// # Errors
/// * `CryptoError::DecryptionFailed` - OAEP unpadding failed, or the plaintext
///   does not fit in `out`
pub fn open<K: PrivateKeyPrimitive + ?Sized>(
    message: &SessionMessage<'_>,
    decryption_key: &K,
    out: Option<&mut [u8]>,
) -> Result<usize, CryptoError> {
    let Some(out) = out else {
        return Ok(decryption_key.key_size());
    };

    let plaintext = decryption_key.private_decrypt_oaep(message.ciphertext())?;
    let available = out.len();
    let target = out.get_mut(..plaintext.len()).ok_or_else(|| {
        CryptoError::DecryptionFailed(format!(
            "plaintext is {} bytes, output buffer holds {available}",
            plaintext.len()
        ))
    })?;
    target.copy_from_slice(&plaintext);
    Ok(plaintext.len())
}

/// Reject keys whose modulus is below `min_bits`.
pub fn check_key_bits(bits: usize, min_bits: usize) -> Result<(), CryptoError> {
    if bits < min_bits {
        return Err(CryptoError::KeyTooSmall { bits, min_bits });
    }
    Ok(())
}
