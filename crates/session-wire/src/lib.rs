//! # Session Wire - Sealed Session Message Framing
//!
//! Pure data-shape logic for the sealed session message. No cryptography
//! happens here; the envelope crate hands finished ciphertext and signature
//! bytes to [`encode_fields`] and receives a validated [`SessionMessage`]
//! view back from [`SessionMessage::parse`].
//!
//! ## Wire Format
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | Common header (version, type, body length) |
//! | 4 | 2 | Ciphertext length (BE) |
//! | 6 | n | Ciphertext |
//! | 6 + n | 2 | Signature length (BE) |
//! | 8 + n | m | Signature |
//!
//! The header body length must equal `4 + n + m` exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod errors;
pub mod header;

// Re-exports
pub use codec::{encode_fields, encoded_len, SessionMessage, MAX_FIELD_LENGTH, MIN_BODY_LENGTH};
pub use errors::{CapacityError, EncodeError, FormatError};
pub use header::{
    CommonHeader, HeaderCodec, MessageHeader, MessageType, CURRENT_PROTOCOL_VERSION,
    HEADER_LENGTH,
};
