//! # Session Envelope - Encrypt-then-Sign Session Messages
//!
//! Transports a small secret (an ephemeral session parameter) so that only
//! the intended receiver can read it and the receiver can prove who sent it.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Digest, PSS padding, seal/verify/open
//! - **Ports Layer** (`ports/`): Inbound API, outbound key primitives
//! - **Adapters Layer** (`adapters/`): RSA key primitives
//! - **Service Layer** (`service.rs`): Configuration and logging around the domain
//!
//! ## Construction
//!
//! | Step | Operation | Parameters |
//! |------|-----------|------------|
//! | 1 | Encrypt cleartext | RSA-OAEP (SHA-1), receiver's public key |
//! | 2 | Digest ciphertext | SHA-256 |
//! | 3 | Pad digest | EMSA-PSS, SHA-256, random salt |
//! | 4 | Sign block | Raw RSA, sender's private key |
//! | 5 | Frame | `session-wire` |
//!
//! ## Security Notes
//!
//! - Framing is validated before any cryptographic operation runs
//! - Verification and decryption are independent; `receive` runs both, verify first
//! - No replay protection: callers must track session state themselves

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::config::EnvelopeConfig;
pub use domain::digest::{ciphertext_digest, MessageDigest, DIGEST_LENGTH};
pub use domain::envelope::{open, seal, seal_into, seal_parts, verify, SealedParts};
pub use domain::errors::{ConfigError, CryptoError, SessionError};
pub use domain::pss::{PssPadding, SaltLength};
pub use ports::inbound::SessionEnvelopeApi;
pub use ports::outbound::{oaep_capacity, PrivateKeyPrimitive, PublicKeyPrimitive};
pub use service::SessionEnvelopeService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
