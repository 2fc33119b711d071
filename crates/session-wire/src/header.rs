//! # Common Message Header
//!
//! Every protocol message starts with the same fixed-size header:
//!
//! ```text
//! [ version (1) | type (1) | body length (2, BE) ]
//! ```
//!
//! The session codec only needs the header through the [`HeaderCodec`]
//! trait, so an application with a different envelope can plug its own in.

use crate::errors::FormatError;
use tracing::trace;

/// Protocol version stamped by [`CommonHeader::default`].
pub const CURRENT_PROTOCOL_VERSION: u8 = 2;

/// Size of the common header in bytes.
pub const HEADER_LENGTH: usize = 4;

/// Message type tags carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    /// Liveness probe
    HelloRequest = 0x00,
    /// Liveness probe answer
    HelloResponse = 0x01,
    /// Certificate presentation
    Presentation = 0x02,
    /// Sealed session parameters sent by the initiator
    SessionRequest = 0x03,
    /// Sealed session parameters sent by the responder
    Session = 0x04,
    /// Session-encrypted payload
    Data = 0x70,
    /// Keep-alive on an established session
    KeepAlive = 0xFF,
}

impl MessageType {
    /// Wire tag for this type.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = FormatError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0x00 => Ok(Self::HelloRequest),
            0x01 => Ok(Self::HelloResponse),
            0x02 => Ok(Self::Presentation),
            0x03 => Ok(Self::SessionRequest),
            0x04 => Ok(Self::Session),
            0x70 => Ok(Self::Data),
            0xFF => Ok(Self::KeepAlive),
            other => Err(FormatError::UnknownMessageType(other)),
        }
    }
}

/// Decoded common header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    version: u8,
    message_type: MessageType,
    body_length: usize,
    header_length: usize,
}

impl MessageHeader {
    /// Protocol version on the wire.
    #[must_use]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Message type tag.
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Declared body length (everything after the header).
    #[must_use]
    pub fn body_length(&self) -> usize {
        self.body_length
    }

    /// Size of the header itself.
    #[must_use]
    pub fn header_length(&self) -> usize {
        self.header_length
    }

    /// Header plus body.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.header_length + self.body_length
    }
}

/// Reads and stamps the envelope header around a message body.
pub trait HeaderCodec {
    /// Fixed header size in bytes.
    fn header_len(&self) -> usize;

    /// Largest body length the header can declare.
    fn max_body_len(&self) -> usize;

    /// Stamp the header into `out[..header_len()]`.
    ///
    /// Callers guarantee `out` holds at least `header_len()` bytes and that
    /// `body_length <= max_body_len()`.
    fn write_header(
        &self,
        out: &mut [u8],
        message_type: MessageType,
        body_length: usize,
    ) -> Result<(), FormatError>;

    /// Parse the header at the start of `buf`.
    ///
    /// Implementations should reject a buffer whose length is not exactly
    /// `header_len() + body_length`; [`SessionMessage::parse_with`] checks it
    /// again regardless.
    ///
    /// [`SessionMessage::parse_with`]: crate::SessionMessage::parse_with
    fn read_header(&self, buf: &[u8]) -> Result<MessageHeader, FormatError>;
}

/// The 4-byte common header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonHeader {
    version: u8,
}

impl CommonHeader {
    /// Header codec speaking `version`.
    #[must_use]
    pub fn new(version: u8) -> Self {
        Self { version }
    }

    /// Configured protocol version.
    #[must_use]
    pub fn version(&self) -> u8 {
        self.version
    }
}

impl Default for CommonHeader {
    fn default() -> Self {
        Self::new(CURRENT_PROTOCOL_VERSION)
    }
}

impl HeaderCodec for CommonHeader {
    fn header_len(&self) -> usize {
        HEADER_LENGTH
    }

    fn max_body_len(&self) -> usize {
        usize::from(u16::MAX)
    }

    fn write_header(
        &self,
        out: &mut [u8],
        message_type: MessageType,
        body_length: usize,
    ) -> Result<(), FormatError> {
        let body_length = u16::try_from(body_length).map_err(|_| FormatError::BodyTooLarge {
            len: body_length,
            max: self.max_body_len(),
        })?;
        let header = out.get_mut(..HEADER_LENGTH).ok_or(FormatError::BadLength)?;

        header[0] = self.version;
        header[1] = message_type.as_u8();
        header[2..4].copy_from_slice(&body_length.to_be_bytes());
        Ok(())
    }

    fn read_header(&self, buf: &[u8]) -> Result<MessageHeader, FormatError> {
        if buf.len() < HEADER_LENGTH {
            trace!(len = buf.len(), "Buffer shorter than common header");
            return Err(FormatError::BadLength);
        }

        if buf[0] != self.version {
            return Err(FormatError::UnsupportedVersion {
                expected: self.version,
                actual: buf[0],
            });
        }

        let message_type = MessageType::try_from(buf[1])?;
        let body_length = usize::from(u16::from_be_bytes([buf[2], buf[3]]));

        // Declared body must cover the buffer exactly: no short reads, no trailing bytes
        if buf.len() != HEADER_LENGTH + body_length {
            trace!(
                len = buf.len(),
                declared = HEADER_LENGTH + body_length,
                "Header body length disagrees with buffer"
            );
            return Err(FormatError::BadLength);
        }

        Ok(MessageHeader {
            version: buf[0],
            message_type,
            body_length,
            header_length: HEADER_LENGTH,
        })
    }
}
