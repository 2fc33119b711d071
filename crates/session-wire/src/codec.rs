//! # Session Message Codec
//!
//! Lays out and parses the body of a session message:
//!
//! ```text
//! [ common header ]
//! [ ciphertext length (2, BE) ][ ciphertext ]
//! [ signature length (2, BE)  ][ signature  ]
//! ```
//!
//! Lengths are checked for strict equality. A buffer carrying bytes past the
//! declared signature is rejected rather than silently ignored.

use crate::errors::{CapacityError, EncodeError, FormatError};
use crate::header::{CommonHeader, HeaderCodec, MessageHeader, MessageType};
use std::ops::Range;
use tracing::debug;

/// Size of each length prefix.
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// Smallest possible body: two empty length-prefixed fields.
pub const MIN_BODY_LENGTH: usize = 2 * LENGTH_PREFIX_SIZE;

/// Largest length a single field can declare.
pub const MAX_FIELD_LENGTH: usize = u16::MAX as usize;

/// Read-only view over a well-formed session message.
///
/// Construction validates the framing once; accessors never fail afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionMessage<'a> {
    buffer: &'a [u8],
    header: MessageHeader,
    ciphertext: (usize, usize),
    signature: (usize, usize),
}

impl<'a> SessionMessage<'a> {
    /// Parse a buffer framed with the default [`CommonHeader`].
    pub fn parse(buffer: &'a [u8]) -> Result<Self, FormatError> {
        Self::parse_with(buffer, &CommonHeader::default())
    }

    /// Parse a buffer framed with a caller-supplied header codec.
    ///
    /// Checks run in order so that no length prefix is read before the bytes
    /// holding it are known to exist:
    /// 0. buffer is exactly as long as the header declares, whatever `codec`
    ///    itself enforced;
    /// 1. body holds both length prefixes;
    /// 2. body holds the declared ciphertext and the signature prefix;
    /// 3. body is exactly as long as both declared fields.
    pub fn parse_with<H: HeaderCodec + ?Sized>(
        buffer: &'a [u8],
        codec: &H,
    ) -> Result<Self, FormatError> {
        let header = codec.read_header(buffer)?;
        if buffer.len() != header.total_length() {
            debug!(
                len = buffer.len(),
                total_length = header.total_length(),
                "Session buffer length does not match header"
            );
            return Err(FormatError::BadLength);
        }

        let body_start = header.header_length();
        let body = buffer.get(body_start..).ok_or(FormatError::BadLength)?;

        if body.len() < MIN_BODY_LENGTH {
            debug!(body_len = body.len(), "Session body shorter than length prefixes");
            return Err(FormatError::BadLength);
        }

        let ciphertext_len = read_prefix(body, 0)?;
        if body.len() < MIN_BODY_LENGTH + ciphertext_len {
            debug!(
                body_len = body.len(),
                ciphertext_len, "Session body shorter than declared ciphertext"
            );
            return Err(FormatError::BadLength);
        }

        let signature_prefix = LENGTH_PREFIX_SIZE + ciphertext_len;
        let signature_len = read_prefix(body, signature_prefix)?;
        if body.len() != MIN_BODY_LENGTH + ciphertext_len + signature_len {
            debug!(
                body_len = body.len(),
                ciphertext_len,
                signature_len,
                "Session body length does not match declared fields"
            );
            return Err(FormatError::BadLength);
        }

        let ciphertext_start = body_start + LENGTH_PREFIX_SIZE;
        let signature_start = body_start + signature_prefix + LENGTH_PREFIX_SIZE;

        Ok(Self {
            buffer,
            header,
            ciphertext: (ciphertext_start, ciphertext_len),
            signature: (signature_start, signature_len),
        })
    }

    /// Decoded common header.
    #[must_use]
    pub fn header(&self) -> &MessageHeader {
        &self.header
    }

    /// Message type tag from the header.
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        self.header.message_type()
    }

    /// Recipient-encrypted payload.
    #[must_use]
    pub fn ciphertext(&self) -> &'a [u8] {
        &self.buffer[span(self.ciphertext)]
    }

    /// Sender's signature over the ciphertext.
    #[must_use]
    pub fn signature(&self) -> &'a [u8] {
        &self.buffer[span(self.signature)]
    }

    /// The whole framed message.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.buffer
    }

    /// Framed length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false: a parsed message carries at least its header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

fn span((start, len): (usize, usize)) -> Range<usize> {
    start..start + len
}

fn read_prefix(body: &[u8], offset: usize) -> Result<usize, FormatError> {
    let bytes: [u8; LENGTH_PREFIX_SIZE] = body
        .get(offset..offset + LENGTH_PREFIX_SIZE)
        .and_then(|b| b.try_into().ok())
        .ok_or(FormatError::BadLength)?;
    Ok(usize::from(u16::from_be_bytes(bytes)))
}

/// Exact framed size of a message carrying the given field lengths.
pub fn encoded_len<H: HeaderCodec + ?Sized>(
    ciphertext_len: usize,
    signature_len: usize,
    codec: &H,
) -> usize {
    codec.header_len() + MIN_BODY_LENGTH + ciphertext_len + signature_len
}

/// Write both length-prefixed fields and stamp the header.
///
/// Returns the number of bytes written. Every length and capacity check runs
/// before the first byte lands in `out`, so a failed call leaves it untouched.
pub fn encode_fields<H: HeaderCodec + ?Sized>(
    out: &mut [u8],
    ciphertext: &[u8],
    signature: &[u8],
    message_type: MessageType,
    codec: &H,
) -> Result<usize, EncodeError> {
    let ciphertext_len = checked_field("ciphertext", ciphertext)?;
    let signature_len = checked_field("signature", signature)?;

    let body_len = MIN_BODY_LENGTH + ciphertext.len() + signature.len();
    if body_len > codec.max_body_len() {
        return Err(FormatError::BodyTooLarge {
            len: body_len,
            max: codec.max_body_len(),
        }
        .into());
    }

    let header_len = codec.header_len();
    let total = header_len + body_len;
    if out.len() < total {
        return Err(CapacityError {
            required: total,
            available: out.len(),
        }
        .into());
    }

    let body = &mut out[header_len..total];
    let (ct_prefix, rest) = body.split_at_mut(LENGTH_PREFIX_SIZE);
    let (ct_bytes, rest) = rest.split_at_mut(ciphertext.len());
    let (sig_prefix, sig_bytes) = rest.split_at_mut(LENGTH_PREFIX_SIZE);

    ct_prefix.copy_from_slice(&ciphertext_len.to_be_bytes());
    ct_bytes.copy_from_slice(ciphertext);
    sig_prefix.copy_from_slice(&signature_len.to_be_bytes());
    sig_bytes.copy_from_slice(signature);

    codec.write_header(out, message_type, body_len)?;

    Ok(total)
}

fn checked_field(field: &'static str, bytes: &[u8]) -> Result<u16, FormatError> {
    u16::try_from(bytes.len()).map_err(|_| FormatError::FieldTooLarge {
        field,
        len: bytes.len(),
        max: MAX_FIELD_LENGTH,
    })
}
