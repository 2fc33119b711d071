//! # Concurrent Use
//!
//! The service holds no mutable state, so one instance can seal and receive
//! from many threads at once with independent buffers.

#[cfg(test)]
mod tests {
    use crate::fixtures::{encryption_key, signing_key};
    use session_envelope::{SessionEnvelopeApi, SessionEnvelopeService};
    use session_wire::MessageType;
    use std::thread;

    const THREADS: usize = 4;
    const MESSAGES_PER_THREAD: usize = 3;

    #[test]
    fn test_shared_service_across_threads() {
        let service = SessionEnvelopeService::default();
        let encryption = encryption_key().to_public_key();
        let verification = signing_key().to_public_key();

        thread::scope(|scope| {
            for worker in 0..THREADS {
                let service = &service;
                let encryption = &encryption;
                let verification = &verification;

                scope.spawn(move || {
                    for n in 0..MESSAGES_PER_THREAD {
                        let payload = format!("worker-{worker}-message-{n}");
                        let buf = service
                            .seal(
                                payload.as_bytes(),
                                encryption,
                                signing_key(),
                                MessageType::SessionRequest,
                            )
                            .unwrap();

                        let cleartext = service
                            .receive(&buf, verification, encryption_key())
                            .unwrap();
                        assert_eq!(cleartext.as_slice(), payload.as_bytes());
                    }
                });
            }
        });
    }

    #[test]
    fn test_seal_into_independent_buffers() {
        let service = SessionEnvelopeService::default();
        let encryption = encryption_key().to_public_key();
        let mut buffers = vec![[0u8; 1024]; THREADS];

        let written: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = buffers
                .iter_mut()
                .enumerate()
                .map(|(worker, out)| {
                    let service = &service;
                    let encryption = &encryption;
                    scope.spawn(move || {
                        service
                            .seal_into(
                                out,
                                &[worker as u8; 16],
                                encryption,
                                signing_key(),
                                MessageType::Session,
                            )
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (worker, (out, len)) in buffers.iter().zip(written).enumerate() {
            let cleartext = service
                .receive(
                    &out[..len],
                    &signing_key().to_public_key(),
                    encryption_key(),
                )
                .unwrap();
            assert_eq!(cleartext.as_slice(), &[worker as u8; 16]);
        }
    }
}
