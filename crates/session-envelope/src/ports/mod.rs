//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that callers of the envelope use
//! - **Outbound (Driven)**: Key primitives the envelope needs

pub mod inbound;
pub mod outbound;
