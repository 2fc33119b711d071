//! # Message Digest
//!
//! The one digest used across the envelope: the ciphertext digest, the PSS
//! hash and MGF1 all run SHA-256. Peers agree on it out of band; it is never
//! negotiated and never chosen by the caller.

use sha2::{Digest, Sha256};

/// Digest algorithm shared by signing and verification.
pub type MessageDigest = Sha256;

/// Output length of [`MessageDigest`] in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Digest output.
pub type DigestBytes = [u8; DIGEST_LENGTH];

/// Digest the ciphertext that the signature covers.
pub fn ciphertext_digest(ciphertext: &[u8]) -> DigestBytes {
    MessageDigest::digest(ciphertext).into()
}

/// MGF1 mask generation (RFC 8017 B.2.1) over [`MessageDigest`].
///
/// XORs the mask derived from `seed` into `out` in place.
pub(crate) fn mgf1_xor(out: &mut [u8], seed: &[u8]) {
    let mut counter: u32 = 0;
    for chunk in out.chunks_mut(DIGEST_LENGTH) {
        let mut hasher = MessageDigest::new();
        hasher.update(seed);
        hasher.update(counter.to_be_bytes());
        let block = hasher.finalize();

        for (byte, mask) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= mask;
        }
        counter = counter.wrapping_add(1);
    }
}
