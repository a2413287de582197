//! # Domain Errors
//!
//! Error taxonomy for chain-state validation, segment chaining and
//! aggregation. Every error is fatal where it is detected.

use thiserror::Error;

use super::attestation::CircuitIdentity;
use super::digest::Digest;

/// Result alias for attestation operations.
pub type Result<T> = std::result::Result<T, AttestationError>;

/// Rejection reported by a header validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Rejection reported by a proof verifier or prover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct VerificationError {
    /// Human-readable reason.
    pub reason: String,
}

impl VerificationError {
    /// Create a verification error.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Which continuity invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContinuityMismatch {
    /// Adjacent segments disagree on the boundary state.
    #[error("state hash mismatch: expected {expected}, got {actual}")]
    StateHash {
        /// Previous segment's final state hash
        expected: Digest,
        /// This segment's initial state hash
        actual: Digest,
    },

    /// Adjacent segments disagree on the boundary height.
    #[error("height mismatch: expected {expected}, got {actual}")]
    Height {
        /// Previous segment's final height
        expected: u32,
        /// This segment's initial height
        actual: u32,
    },

    /// Declared initial state does not hash to the prior proof's output.
    #[error("initial state mismatch: prior proof attests {expected}, declared state hashes to {actual}")]
    InitialState {
        /// `new_state_hash` of the prior attestation
        expected: Digest,
        /// Hash of the declared initial state
        actual: Digest,
    },

    /// Genesis bootstrap with a state that is not the genesis constant.
    #[error("initial state is not genesis (hash {actual})")]
    NotGenesis {
        /// Hash of the declared initial state
        actual: Digest,
    },
}

/// Which identity check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityMismatch {
    /// Prior proof was produced by a program outside the allow-list.
    #[error(
        "circuit identity {actual} is not sanctioned by pin set {version} (allowed: {})",
        join_identities(.allowed)
    )]
    NotSanctioned {
        /// Identity reported by the verifier
        actual: CircuitIdentity,
        /// Pin set version
        version: &'static str,
        /// Identities the pin set accepts
        allowed: &'static [CircuitIdentity],
    },

    /// Prior attestation continues a chain from an unsanctioned program.
    #[error(
        "embedded circuit identity {actual} is not sanctioned by pin set {version} (allowed: {})",
        join_identities(.allowed)
    )]
    EmbeddedNotSanctioned {
        /// Identity carried inside the prior attestation
        actual: CircuitIdentity,
        /// Pin set version
        version: &'static str,
        /// Identities the pin set accepts
        allowed: &'static [CircuitIdentity],
    },

    /// Interior task declares identity fields other than the pinned ones.
    #[error("unexpected circuit identity at index {index}: {field} expected {expected}, got {actual}")]
    UnexpectedCircuitIdentity {
        /// Index of the offending task
        index: usize,
        /// Name of the mismatching field
        field: &'static str,
        /// Pinned value
        expected: Digest,
        /// Declared value
        actual: Digest,
    },
}

/// Attestation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttestationError {
    /// Empty or malformed input.
    #[error("Structural error: {0}")]
    Structural(String),

    /// Height or state-hash discontinuity.
    #[error("Continuity error at index {index}: {mismatch}")]
    Continuity {
        /// Index of the segment (or 0 for a chaining step)
        index: usize,
        /// Failed invariant
        mismatch: ContinuityMismatch,
    },

    /// Circuit identity outside the pinned set.
    #[error("Identity error: {0}")]
    Identity(IdentityMismatch),

    /// Header validator rejected a block.
    #[error("Header validation failed for block {index} (height {height}): {reason}")]
    HeaderValidation {
        /// Zero-based index of the block in its batch
        index: usize,
        /// Height the block would have had
        height: u32,
        /// Validator reason
        reason: String,
    },

    /// Proof verifier rejected a proof.
    #[error("Proof verification failed: {0}")]
    ProofVerification(#[from] VerificationError),
}

impl AttestationError {
    /// Taxonomy name, for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Structural(_) => "structural",
            Self::Continuity { .. } => "continuity",
            Self::Identity(_) => "identity",
            Self::HeaderValidation { .. } => "header_validation",
            Self::ProofVerification(_) => "proof_verification",
        }
    }
}

impl From<IdentityMismatch> for AttestationError {
    fn from(mismatch: IdentityMismatch) -> Self {
        Self::Identity(mismatch)
    }
}

fn join_identities(identities: &[CircuitIdentity]) -> String {
    identities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
