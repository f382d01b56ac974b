//! Test module for determinism, integration and property tests.
//!
//! These tests drive whole battles through the public API:
//! - **Determinism tests**: the same seed or script replays the same battle
//! - **Integration tests**: scheduling, targeting and termination end to end
//! - **Property tests**: bounds that must hold for any input
//!
//! # Test Structure
//!
//! - `determinism.rs`: Tests that verify reproducible execution
//! - `integration.rs`: End-to-end tests of the battle loop
//! - `properties.rs`: proptest invariants over entities and battles
//! - `helpers.rs`: Test setup utilities and factory functions

mod determinism;
mod helpers;

// Re-export for convenience
pub use helpers::*;
