//! # Test Fixtures
//!
//! Key generation dominates test time, so every key pair is generated once
//! per process and shared.

use rsa::RsaPrivateKey;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Key pair A: receiver's encryption key (2048-bit).
pub fn encryption_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| generate(2048))
}

/// Key pair B: sender's signing key (2048-bit).
pub fn signing_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| generate(2048))
}

/// Unrelated key pair C, same size as A and B (2048-bit).
pub fn stranger_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| generate(2048))
}

/// Smaller key pair for tests that only care about mismatched sizes (1024-bit).
pub fn small_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| generate(1024))
}

/// Generate an RSA key pair.
pub fn generate(bits: usize) -> RsaPrivateKey {
    RsaPrivateKey::new(&mut rand::thread_rng(), bits).expect("RSA key generation")
}

/// Install a test-friendly subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
