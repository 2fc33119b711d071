//! # Adapters Layer
//!
//! Concrete key primitives backing the outbound ports.

pub mod rsa_keys;
