//! # Domain Module
//!
//! Core domain types: digests, chain state, attestations, errors and the
//! pinned protocol constants.

pub mod attestation;
pub mod chain_state;
pub mod digest;
pub mod errors;
pub mod invariants;

pub use attestation::*;
pub use chain_state::*;
pub use digest::*;
pub use errors::*;
pub use invariants::*;
