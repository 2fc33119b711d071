//! Envelope configuration and validation
//!
//! # Example
//!
//! ```
//! use session_envelope::domain::config::EnvelopeConfig;
//!
//! let config: EnvelopeConfig =
//!     serde_json::from_str(r#"{ "salt_length": "max", "min_key_bits": 2048 }"#).unwrap();
//! config.validate().unwrap();
//! assert_eq!(config.protocol_version, 2);
//! ```

use super::errors::ConfigError;
use super::pss::SaltLength;
use serde::{Deserialize, Serialize};
use session_wire::{CommonHeader, CURRENT_PROTOCOL_VERSION};

/// Lowest `min_key_bits` the envelope will accept.
pub const MIN_KEY_BITS_FLOOR: usize = 512;

/// Settings shared by every seal and receive call of a service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Version stamped into, and required from, the common header
    pub protocol_version: u8,
    /// PSS salt length used when signing
    pub salt_length: SaltLength,
    /// Keys with a smaller modulus are refused on both sides
    pub min_key_bits: usize,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            protocol_version: CURRENT_PROTOCOL_VERSION,
            salt_length: SaltLength::Digest,
            min_key_bits: 1024,
        }
    }
}

impl EnvelopeConfig {
    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.protocol_version == 0 {
            return Err(ConfigError::InvalidProtocolVersion(self.protocol_version));
        }

        if self.min_key_bits < MIN_KEY_BITS_FLOOR {
            return Err(ConfigError::MinKeyBitsTooSmall(self.min_key_bits));
        }

        Ok(())
    }

    /// Header codec speaking the configured version.
    #[must_use]
    pub fn header_codec(&self) -> CommonHeader {
        CommonHeader::new(self.protocol_version)
    }
}
