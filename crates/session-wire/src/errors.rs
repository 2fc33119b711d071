//! Wire codec error types.

use thiserror::Error;

/// Malformed framing detected while reading or laying out a message.
///
/// Every variant is raised before any cryptographic work touches the buffer.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Buffer length disagrees with the declared header or field lengths
    #[error("bad message length")]
    BadLength,

    /// A length-prefixed field does not fit its 16-bit prefix
    #[error("{field} too large: {len} > {max}")]
    FieldTooLarge {
        /// Which field overflowed
        field: &'static str,
        /// Requested length in bytes
        len: usize,
        /// Largest encodable length
        max: usize,
    },

    /// Total body does not fit the header's body-length field
    #[error("message body too large: {len} > {max}")]
    BodyTooLarge {
        /// Requested body length in bytes
        len: usize,
        /// Largest encodable body length
        max: usize,
    },

    /// Header carries a protocol version this codec does not speak
    #[error("unsupported protocol version: expected {expected}, got {actual}")]
    UnsupportedVersion {
        /// Version the codec was configured with
        expected: u8,
        /// Version found on the wire
        actual: u8,
    },

    /// Header carries a type tag outside the known set
    #[error("unknown message type: {0:#04x}")]
    UnknownMessageType(u8),
}

/// Output buffer cannot hold the encoded message.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("output buffer too small: need {required} bytes, have {available}")]
pub struct CapacityError {
    /// Exact number of bytes the message needs
    pub required: usize,
    /// Number of bytes the caller supplied
    pub available: usize,
}

/// Errors raised by [`encode_fields`](crate::codec::encode_fields).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Field or body length cannot be framed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Output buffer is too small
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}
