//! # HC Attestation
//!
//! Header-chain attestation: chain-state hashing, batch header validation,
//! segment chaining and range aggregation.
//!
//! **Hash scheme:** v1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A header chain is proven in segments. Each segment produces an
//! [`Attestation`] binding the chain state before the segment to the state
//! after it. Segments link through the state hash: a continuation must start
//! at exactly the state its predecessor attested, and must be produced by a
//! sanctioned circuit.
//!
//! ## Invariants
//!
//! | Check | Where |
//! |-------|-------|
//! | Initial state matches the prior proof's final state hash | segment chainer |
//! | Prior proof produced by a pinned circuit | segment chainer |
//! | Genesis bootstrap starts at the genesis constant | segment chainer |
//! | Adjacent segments share height and state hash | aggregator |
//! | Interior segments declare the pinned identity | aggregator |
//!
//! ## Module Structure
//!
//! ```text
//! hc-attestation/
//! ├── domain/          # Digest, ChainState, Attestation, errors, pins
//! ├── algorithms/      # Batch validator, segment chainer, aggregator
//! ├── ports/           # API trait (inbound) + collaborator traits (outbound)
//! ├── adapters/        # Bitcoin header validator, in-memory proof store
//! ├── application/     # AttestationService and the range driver
//! ├── config.rs        # AttestationConfig
//! └── telemetry.rs     # tracing-subscriber setup
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

// Re-exports
pub use adapters::{
    BitcoinHeaderValidator, BlockHeader, InMemoryProofStore, Network, NetworkParams,
};
pub use algorithms::{aggregate, chain_segment, chain_segment_with_state, validate_batch};
pub use application::{resume_point, AttestationService};
pub use config::{AttestationConfig, ConfigError, LoggingConfig};
pub use domain::{
    AggregatedRange, Attestation, AttestationError, ChainState, CircuitIdentity,
    CircuitIdentityPins, ContinuityMismatch, Digest, IdentityMismatch, PriorProof,
    ProofDocument, Result, TaskIdentity, TaskResult, ValidationError, VerificationError,
    VerifiedProof, GENESIS_STATE_HASH, HASH_SCHEME_VERSION, PINS_V1,
};
pub use ports::{
    AttestationApi, HeaderValidator, ProofStore, ProofVerifier, SegmentProver, MockBlock,
    MockHeaderValidator, MockProofVerifier, MockProver,
};
pub use telemetry::{init_logging, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
