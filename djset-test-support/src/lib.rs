//! Shared test utilities used across djset crates.

pub mod proptest_profile;
pub mod tracing;
