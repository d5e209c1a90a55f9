//! Test utilities shared across the refkit workspace
//!
//! This crate provides common testing infrastructure, currently process
//! environment isolation ([`EnvTestGuard`]).
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;

// Re-export commonly used items
pub use env::EnvTestGuard;
