//! # Domain Layer
//!
//! Pure cryptographic logic with no I/O dependencies.
//! Key primitives are reached through the outbound ports only.

pub mod config;
pub mod digest;
pub mod envelope;
pub mod errors;
pub mod pss;
