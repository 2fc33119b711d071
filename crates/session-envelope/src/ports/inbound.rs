//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the sealed session envelope.

use crate::domain::errors::{CryptoError, SessionError};
use crate::ports::outbound::{PrivateKeyPrimitive, PublicKeyPrimitive};
use session_wire::{FormatError, MessageType, SessionMessage};
use zeroize::Zeroizing;

/// Sealed Session Envelope API.
///
/// Every call is a synchronous, stateless transform: buffers are borrowed for
/// the call only and keys are read-only. Implementations must be thread-safe
/// (`Send + Sync`).
pub trait SessionEnvelopeApi: Send + Sync {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Encrypt `cleartext` for the holder of `encryption_key`, sign the
    /// ciphertext with `signing_key` and frame the result.
    fn seal<E, S>(
        &self,
        cleartext: &[u8],
        encryption_key: &E,
        signing_key: &S,
        message_type: MessageType,
    ) -> Result<Vec<u8>, SessionError>
    where
        E: PublicKeyPrimitive + ?Sized,
        S: PrivateKeyPrimitive + ?Sized;

    /// Same as [`seal`](Self::seal), writing into a caller-supplied buffer.
    ///
    /// # Errors
    /// * `SessionError::Encode` - `out` is smaller than the framed message;
    ///   `out` is left untouched
    fn seal_into<E, S>(
        &self,
        out: &mut [u8],
        cleartext: &[u8],
        encryption_key: &E,
        signing_key: &S,
        message_type: MessageType,
    ) -> Result<usize, SessionError>
    where
        E: PublicKeyPrimitive + ?Sized,
        S: PrivateKeyPrimitive + ?Sized;

    // =========================================================================
    // Reception
    // =========================================================================

    /// Validate framing and return a read-only view. No cryptography runs.
    fn parse<'a>(&self, buffer: &'a [u8]) -> Result<SessionMessage<'a>, FormatError>;

    /// Authenticate the message against the sender's public key.
    fn verify<K>(&self, message: &SessionMessage<'_>, signing_key: &K) -> Result<(), CryptoError>
    where
        K: PublicKeyPrimitive + ?Sized;

    /// Decrypt into `out`, or return the plaintext size bound when `out` is `None`.
    fn open<K>(
        &self,
        message: &SessionMessage<'_>,
        decryption_key: &K,
        out: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>
    where
        K: PrivateKeyPrimitive + ?Sized;

    /// Parse, verify, then open, in that order.
    ///
    /// The ciphertext is never decrypted unless the signature checks out.
    fn receive<S, D>(
        &self,
        buffer: &[u8],
        signing_key: &S,
        decryption_key: &D,
    ) -> Result<Zeroizing<Vec<u8>>, SessionError>
    where
        S: PublicKeyPrimitive + ?Sized,
        D: PrivateKeyPrimitive + ?Sized;
}
