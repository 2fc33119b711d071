//! # Envelope Errors
//!
//! Error types for sealing, verifying and opening session messages.

use session_wire::{EncodeError, FormatError};
use thiserror::Error;

/// Failures raised by the cryptographic primitives.
///
/// None of these are retried: the same input will fail the same way.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// OAEP encryption failed (usually cleartext over the key's capacity)
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// OAEP decryption failed, or the plaintext does not fit the output buffer
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Signature does not authenticate the ciphertext under the given key
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// PSS encoding could not be produced for this modulus
    #[error("Padding failed: {0}")]
    PaddingFailed(String),

    /// Raw private-key transform failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Raw transform input is not exactly the modulus size
    #[error("Key size mismatch: expected {expected} bytes, got {actual}")]
    KeySizeMismatch {
        /// Modulus size in bytes
        expected: usize,
        /// Input size in bytes
        actual: usize,
    },

    /// Input rejected by the primitive before the transform ran
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Key modulus is below the configured minimum
    #[error("Key too small: {bits} bits, minimum {min_bits}")]
    KeyTooSmall {
        /// Modulus size of the offending key
        bits: usize,
        /// Configured minimum
        min_bits: usize,
    },
}

/// Invalid envelope configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Version 0 is never stamped on the wire
    #[error("Invalid protocol version: {0}")]
    InvalidProtocolVersion(u8),

    /// Minimum key size is too weak to carry an OAEP payload and a PSS block
    #[error("Minimum key size too small: {0} bits (must be at least 512)")]
    MinKeyBitsTooSmall(usize),
}

/// Any failure of a full seal or receive operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Malformed framing
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Output buffer too small or field not encodable
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Cryptographic failure
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
