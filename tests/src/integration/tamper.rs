//! # Tamper and Malformed Input Tests
//!
//! Attack surface of a received buffer:
//! - Bit flips in ciphertext or signature
//! - Signatures checked against the wrong public key
//! - Declared lengths that disagree with the buffer (short, long, trailing)
//! - Empty fields that frame correctly but cannot decode

#[cfg(test)]
mod tests {
    use crate::fixtures::{encryption_key, signing_key, small_key, stranger_key};
    use proptest::prelude::*;
    use rand::Rng;
    use session_envelope::{
        seal_parts, CryptoError, SaltLength, SessionEnvelopeApi, SessionEnvelopeService,
        SessionError,
    };
    use session_wire::{
        encode_fields, encoded_len, CommonHeader, FormatError, MessageType, SessionMessage,
        HEADER_LENGTH,
    };
    use std::sync::OnceLock;

    const CIPHERTEXT_OFFSET: usize = HEADER_LENGTH + 2;
    const SIGNATURE_OFFSET: usize = HEADER_LENGTH + 2 + 256 + 2;

    /// One sealed message shared by every test in this module.
    fn sealed() -> &'static [u8] {
        static BUF: OnceLock<Vec<u8>> = OnceLock::new();
        BUF.get_or_init(|| {
            SessionEnvelopeService::default()
                .seal(
                    b"tamper-target",
                    &encryption_key().to_public_key(),
                    signing_key(),
                    MessageType::Session,
                )
                .unwrap()
        })
    }

    fn flip(buf: &[u8], index: usize, bit: u8) -> Vec<u8> {
        let mut copy = buf.to_vec();
        copy[index] ^= 1 << bit;
        copy
    }

    fn random_flips(offset: usize, len: usize, count: usize) -> Vec<(usize, u8)> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| (offset + rng.gen_range(0..len), rng.gen_range(0..8)))
            .collect()
    }

    // =========================================================================
    // Bit flips
    // =========================================================================

    #[test]
    fn test_ciphertext_bit_flip_breaks_verify_and_open() {
        let service = SessionEnvelopeService::default();
        let signer = signing_key().to_public_key();

        let mut positions = random_flips(CIPHERTEXT_OFFSET, 256, 24);
        positions.extend([(CIPHERTEXT_OFFSET, 7), (CIPHERTEXT_OFFSET + 255, 0)]);

        for (index, bit) in positions {
            let tampered = flip(sealed(), index, bit);
            let message = service.parse(&tampered).unwrap();

            assert_eq!(
                service.verify(&message, &signer),
                Err(CryptoError::SignatureInvalid),
                "flip at {index}:{bit} passed verification"
            );

            let mut out = [0u8; 256];
            assert!(
                service
                    .open(&message, encryption_key(), Some(&mut out))
                    .is_err(),
                "flip at {index}:{bit} still decrypted"
            );
        }
    }

    #[test]
    fn test_signature_bit_flip_breaks_verify() {
        let service = SessionEnvelopeService::default();
        let signer = signing_key().to_public_key();

        let mut positions = random_flips(SIGNATURE_OFFSET, 256, 24);
        positions.extend([(SIGNATURE_OFFSET, 7), (SIGNATURE_OFFSET + 255, 0)]);

        for (index, bit) in positions {
            let tampered = flip(sealed(), index, bit);
            let message = service.parse(&tampered).unwrap();
            assert_eq!(
                service.verify(&message, &signer),
                Err(CryptoError::SignatureInvalid),
                "flip at {index}:{bit} passed verification"
            );
        }
    }

    #[test]
    fn test_receive_rejects_tampered_ciphertext() {
        let tampered = flip(sealed(), CIPHERTEXT_OFFSET + 100, 3);
        let err = SessionEnvelopeService::default()
            .receive(
                &tampered,
                &signing_key().to_public_key(),
                encryption_key(),
            )
            .unwrap_err();
        assert_eq!(err, SessionError::Crypto(CryptoError::SignatureInvalid));
    }

    // =========================================================================
    // Wrong keys
    // =========================================================================

    #[test]
    fn test_verify_with_other_key_fails() {
        let service = SessionEnvelopeService::default();
        let message = service.parse(sealed()).unwrap();

        for other in [stranger_key(), encryption_key()] {
            assert_eq!(
                service.verify(&message, &other.to_public_key()),
                Err(CryptoError::SignatureInvalid)
            );
        }
    }

    #[test]
    fn test_verify_with_smaller_key_fails() {
        let service = SessionEnvelopeService::default();
        let message = service.parse(sealed()).unwrap();
        assert_eq!(
            service.verify(&message, &small_key().to_public_key()),
            Err(CryptoError::SignatureInvalid)
        );
    }

    #[test]
    fn test_open_with_other_key_fails() {
        let service = SessionEnvelopeService::default();
        let message = service.parse(sealed()).unwrap();
        let mut out = [0u8; 256];
        assert!(matches!(
            service.open(&message, stranger_key(), Some(&mut out)),
            Err(CryptoError::DecryptionFailed(_))
        ));
    }

    // =========================================================================
    // Length exactness
    // =========================================================================

    #[test]
    fn test_body_length_off_by_one_rejected() {
        let service = SessionEnvelopeService::default();
        let declared = u16::from_be_bytes([sealed()[2], sealed()[3]]);
        assert_eq!(usize::from(declared), 4 + 256 + 256);

        for wrong in [declared - 1, declared + 1] {
            let mut buf = sealed().to_vec();
            buf[2..4].copy_from_slice(&wrong.to_be_bytes());
            assert_eq!(service.parse(&buf), Err(FormatError::BadLength));
        }
    }

    #[test]
    fn test_every_truncation_rejected() {
        let service = SessionEnvelopeService::default();
        for len in 0..sealed().len() {
            assert_eq!(
                service.parse(&sealed()[..len]),
                Err(FormatError::BadLength),
                "truncation to {len} bytes accepted"
            );
        }
    }

    #[test]
    fn test_trailing_byte_rejected() {
        let service = SessionEnvelopeService::default();

        let mut buf = sealed().to_vec();
        buf.push(0x00);
        assert_eq!(service.parse(&buf), Err(FormatError::BadLength));

        // Header updated to cover the extra byte; the session fields still disagree
        let body_len = (buf.len() - HEADER_LENGTH) as u16;
        buf[2..4].copy_from_slice(&body_len.to_be_bytes());
        assert_eq!(service.parse(&buf), Err(FormatError::BadLength));
    }

    // =========================================================================
    // Zero-length fields
    // =========================================================================

    #[test]
    fn test_zero_length_fields_parse_but_fail_crypto() {
        let codec = CommonHeader::default();
        let service = SessionEnvelopeService::default();
        let parts = seal_parts(
            b"boundary",
            &encryption_key().to_public_key(),
            signing_key(),
            SaltLength::Digest,
        )
        .unwrap();

        let mut no_signature = vec![0u8; encoded_len(parts.ciphertext.len(), 0, &codec)];
        encode_fields(
            &mut no_signature,
            &parts.ciphertext,
            &[],
            MessageType::Session,
            &codec,
        )
        .unwrap();
        let message = service.parse(&no_signature).unwrap();
        assert!(message.signature().is_empty());
        assert_eq!(
            service.verify(&message, &signing_key().to_public_key()),
            Err(CryptoError::SignatureInvalid)
        );

        let mut no_ciphertext = vec![0u8; encoded_len(0, parts.signature.len(), &codec)];
        encode_fields(
            &mut no_ciphertext,
            &[],
            &parts.signature,
            MessageType::Session,
            &codec,
        )
        .unwrap();
        let message = service.parse(&no_ciphertext).unwrap();
        assert!(message.ciphertext().is_empty());
        assert_eq!(
            service.verify(&message, &signing_key().to_public_key()),
            Err(CryptoError::SignatureInvalid)
        );
        let mut out = [0u8; 256];
        assert!(matches!(
            service.open(&message, encryption_key(), Some(&mut out)),
            Err(CryptoError::DecryptionFailed(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn rewritten_ciphertext_length_never_misframes(declared in any::<u16>()) {
            let mut buf = sealed().to_vec();
            buf[HEADER_LENGTH..HEADER_LENGTH + 2].copy_from_slice(&declared.to_be_bytes());

            // Ciphertext bytes may happen to read as a matching signature prefix;
            // whatever parses must still account for every byte of the body
            match SessionMessage::parse(&buf) {
                Err(e) => prop_assert_eq!(e, FormatError::BadLength),
                Ok(message) => {
                    prop_assert_eq!(message.ciphertext().len(), usize::from(declared));
                    prop_assert_eq!(
                        4 + message.ciphertext().len() + message.signature().len(),
                        buf.len() - HEADER_LENGTH
                    );
                }
            }
        }

        #[test]
        fn rewritten_signature_length_rejected(declared in any::<u16>()) {
            prop_assume!(declared != 256);
            let mut buf = sealed().to_vec();
            buf[SIGNATURE_OFFSET - 2..SIGNATURE_OFFSET].copy_from_slice(&declared.to_be_bytes());
            prop_assert_eq!(SessionMessage::parse(&buf), Err(FormatError::BadLength));
        }
    }
}
