//! # Session Envelope Service
//!
//! Application service that implements the `SessionEnvelopeApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SessionEnvelopeApi`)
//! - Reaches key material only through the outbound primitives
//! - Delegates framing to `session-wire` and cryptography to the domain layer
//! - Applies the configured protocol version, salt policy and key floor

use crate::domain::config::EnvelopeConfig;
use crate::domain::envelope::{self, check_key_bits};
use crate::domain::errors::{ConfigError, CryptoError, SessionError};
use crate::ports::inbound::SessionEnvelopeApi;
use crate::ports::outbound::{PrivateKeyPrimitive, PublicKeyPrimitive};
use session_wire::{CommonHeader, FormatError, MessageType, SessionMessage};
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Session Envelope Service.
///
/// Holds only its configuration, so one instance can serve any number of
/// threads and key pairs concurrently.
#[derive(Debug, Clone)]
pub struct SessionEnvelopeService {
    config: EnvelopeConfig,
    header: CommonHeader,
}

impl SessionEnvelopeService {
    /// Create a service from a validated configuration.
    pub fn new(config: EnvelopeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let header = config.header_codec();
        Ok(Self { config, header })
    }

    /// Active configuration.
    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    fn check_bits(&self, bits: usize) -> Result<(), CryptoError> {
        check_key_bits(bits, self.config.min_key_bits).inspect_err(|_| {
            warn!(
                bits,
                min_bits = self.config.min_key_bits,
                "Refusing key below configured minimum"
            );
        })
    }
}

impl Default for SessionEnvelopeService {
    // The default configuration always passes `validate()`
    fn default() -> Self {
        let config = EnvelopeConfig::default();
        let header = config.header_codec();
        Self { config, header }
    }
}

impl SessionEnvelopeApi for SessionEnvelopeService {
    fn seal<E, S>(
        &self,
        cleartext: &[u8],
        encryption_key: &E,
        signing_key: &S,
        message_type: MessageType,
    ) -> Result<Vec<u8>, SessionError>
    where
        E: PublicKeyPrimitive + ?Sized,
        S: PrivateKeyPrimitive + ?Sized,
    {
        self.check_bits(encryption_key.modulus_bits())?;
        self.check_bits(signing_key.modulus_bits())?;

        let buf = envelope::seal(
            cleartext,
            encryption_key,
            signing_key,
            message_type,
            self.config.salt_length,
            &self.header,
        )?;

        debug!(
            message_type = ?message_type,
            encryption_key_size = encryption_key.key_size(),
            signing_key_size = signing_key.key_size(),
            framed_len = buf.len(),
            "Sealed session message"
        );
        Ok(buf)
    }

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
        S: PrivateKeyPrimitive + ?Sized,
    {
        self.check_bits(encryption_key.modulus_bits())?;
        self.check_bits(signing_key.modulus_bits())?;

        let written = envelope::seal_into(
            out,
            cleartext,
            encryption_key,
            signing_key,
            message_type,
            self.config.salt_length,
            &self.header,
        )?;

        debug!(message_type = ?message_type, written, "Sealed session message into buffer");
        Ok(written)
    }

    fn parse<'a>(&self, buffer: &'a [u8]) -> Result<SessionMessage<'a>, FormatError> {
        SessionMessage::parse_with(buffer, &self.header).inspect_err(|e| {
            warn!(len = buffer.len(), error = %e, "Dropping malformed session message");
        })
    }

    fn verify<K>(&self, message: &SessionMessage<'_>, signing_key: &K) -> Result<(), CryptoError>
    where
        K: PublicKeyPrimitive + ?Sized,
    {
        // An undersized key cannot be the expected signer
        self.check_bits(signing_key.modulus_bits())
            .map_err(|_| CryptoError::SignatureInvalid)?;

        match envelope::verify(message, signing_key) {
            Ok(()) => {
                debug!(
                    message_type = ?message.message_type(),
                    signature_len = message.signature().len(),
                    "Session message signature verified"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    message_type = ?message.message_type(),
                    signature_len = message.signature().len(),
                    "Session message signature rejected"
                );
                Err(e)
            }
        }
    }

    fn open<K>(
        &self,
        message: &SessionMessage<'_>,
        decryption_key: &K,
        out: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>
    where
        K: PrivateKeyPrimitive + ?Sized,
    {
        let sizing = out.is_none();
        if !sizing {
            self.check_bits(decryption_key.modulus_bits())?;
        }

        let len = envelope::open(message, decryption_key, out).inspect_err(|_| {
            warn!(
                ciphertext_len = message.ciphertext().len(),
                "Session message decryption failed"
            );
        })?;

        if !sizing {
            debug!(
                ciphertext_len = message.ciphertext().len(),
                "Session message opened"
            );
        }
        Ok(len)
    }

    fn receive<S, D>(
        &self,
        buffer: &[u8],
        signing_key: &S,
        decryption_key: &D,
    ) -> Result<Zeroizing<Vec<u8>>, SessionError>
    where
        S: PublicKeyPrimitive + ?Sized,
        D: PrivateKeyPrimitive + ?Sized,
    {
        let message = self.parse(buffer)?;
        self.verify(&message, signing_key)?;

        let capacity = self.open(&message, decryption_key, None)?;
        let mut plaintext = Zeroizing::new(vec![0u8; capacity]);
        let len = self.open(&message, decryption_key, Some(plaintext.as_mut_slice()))?;
        plaintext.truncate(len);
        Ok(plaintext)
    }
}
