//! # Integration Tests
//!
//! Wire codec and crypto envelope exercised together through the public API.

pub mod concurrency;
pub mod tamper;
