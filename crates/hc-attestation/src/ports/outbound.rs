//! # Outbound Ports
//!
//! Traits for external collaborators: header validation, proof
//! verification, proof generation and proof storage.

use parking_lot::Mutex;
use primitive_types::U256;

use crate::domain::{
    bytes_to_words, words_to_bytes, Attestation, ChainState, CircuitIdentity, Digest,
    ProofDocument, ValidationError, VerificationError, VerifiedProof, ATTESTATION_WORDS,
    DIGEST_WORDS,
};

/// Header validator - outbound port.
///
/// Applies one block's consensus rules to advance the chain state. Must
/// reject any block whose predecessor linkage, proof-of-work or timing does
/// not match the input state.
pub trait HeaderValidator: Send + Sync {
    /// Block type inspected by this validator.
    type Block;

    /// Validate `block` on top of `state`, returning the successor state.
    fn validate(&self, state: &ChainState, block: &Self::Block)
        -> Result<ChainState, ValidationError>;
}

/// Proof verifier - outbound port.
pub trait ProofVerifier: Send + Sync {
    /// Check a proof document and extract its public outputs.
    fn verify(&self, proof: &ProofDocument) -> Result<VerifiedProof, VerificationError>;
}

/// Segment prover - outbound port.
///
/// Binds an attestation to the computation that produced it.
pub trait SegmentProver: Send + Sync {
    /// Produce a proof document for `attestation`.
    fn prove(&self, attestation: &Attestation) -> Result<ProofDocument, VerificationError>;
}

/// Proof store - outbound port, keyed by the proven segment's final height.
pub trait ProofStore: Send + Sync {
    /// Highest stored height, if any.
    fn latest_height(&self) -> Option<u32>;

    /// Load the proof ending at `height`.
    fn load(&self, height: u32) -> Option<ProofDocument>;

    /// Store the proof ending at `height`.
    fn store(&self, height: u32, proof: ProofDocument);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Block understood by [`MockHeaderValidator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockBlock {
    /// Hash of this block.
    pub hash: Digest,
    /// Hash of the parent block.
    pub prev_hash: Digest,
    /// Block timestamp.
    pub timestamp: u32,
}

impl MockBlock {
    /// Build a chain of `count` blocks on top of `parent`.
    pub fn chain(parent: Digest, start_timestamp: u32, count: usize) -> Vec<MockBlock> {
        let mut blocks = Vec::with_capacity(count);
        let mut prev_hash = parent;
        for i in 0..count {
            let mut words = prev_hash.words;
            words[0] = words[0].wrapping_add(1);
            words[7] = i as u32 + 1;
            let hash = Digest::new(words);
            blocks.push(MockBlock {
                hash,
                prev_hash,
                timestamp: start_timestamp + 600 * (i as u32 + 1),
            });
            prev_hash = hash;
        }
        blocks
    }
}

/// Deterministic header validator for testing.
///
/// Checks parent linkage only, adds one unit of work per block and records
/// the height of every state it was called with.
#[derive(Debug, Default)]
pub struct MockHeaderValidator {
    /// Reject the block that would land at this height.
    pub fail_at_height: Option<u32>,
    calls: Mutex<Vec<u32>>,
}

impl MockHeaderValidator {
    /// Validator that fails at `height`.
    pub fn failing_at(height: u32) -> Self {
        Self {
            fail_at_height: Some(height),
            ..Default::default()
        }
    }

    /// Heights of the input states seen so far, in call order.
    pub fn seen_heights(&self) -> Vec<u32> {
        self.calls.lock().clone()
    }
}

impl HeaderValidator for MockHeaderValidator {
    type Block = MockBlock;

    fn validate(
        &self,
        state: &ChainState,
        block: &MockBlock,
    ) -> Result<ChainState, ValidationError> {
        self.calls.lock().push(state.height);

        let height = state
            .height
            .checked_add(1)
            .ok_or_else(|| ValidationError::new("height overflow"))?;
        if self.fail_at_height == Some(height) {
            return Err(ValidationError::new(format!("mock rejection at height {}", height)));
        }
        if block.prev_hash != state.best_block_hash {
            return Err(ValidationError::new(format!(
                "prev block hash mismatch: expected {}, got {}",
                state.best_block_hash, block.prev_hash
            )));
        }

        Ok(ChainState {
            height,
            total_work: state.total_work.saturating_add(U256::one()),
            best_block_hash: block.hash,
            current_target: state.current_target,
            epoch_start_time: state.epoch_start_time,
            prev_timestamps: state.next_prev_timestamps(block.timestamp),
        })
    }
}

/// Mock proof layout: identity words followed by attestation words.
fn encode_mock_proof(identity: &CircuitIdentity, attestation: &Attestation) -> ProofDocument {
    let mut words = identity.0.words.to_vec();
    words.extend(attestation.to_words());
    ProofDocument::new(words_to_bytes(&words))
}

/// Mock prover for testing; proofs are the plain public outputs.
#[derive(Debug, Clone)]
pub struct MockProver {
    /// Identity stamped on every proof.
    pub identity: CircuitIdentity,
    /// Refuse to prove attestations ending at this height.
    pub fail_at_height: Option<u32>,
}

impl MockProver {
    /// Prover stamping `identity`.
    pub fn new(identity: CircuitIdentity) -> Self {
        Self {
            identity,
            fail_at_height: None,
        }
    }
}

impl SegmentProver for MockProver {
    fn prove(&self, attestation: &Attestation) -> Result<ProofDocument, VerificationError> {
        if self.fail_at_height == Some(attestation.new_height) {
            return Err(VerificationError::new("mock prover failure"));
        }
        Ok(encode_mock_proof(&self.identity, attestation))
    }
}

/// Mock verifier accepting documents produced by [`MockProver`].
#[derive(Debug, Clone, Default)]
pub struct MockProofVerifier {
    /// Reject everything.
    pub should_fail: bool,
}

impl MockProofVerifier {
    /// Build a document this verifier accepts.
    pub fn document(identity: CircuitIdentity, attestation: &Attestation) -> ProofDocument {
        encode_mock_proof(&identity, attestation)
    }
}

impl ProofVerifier for MockProofVerifier {
    fn verify(&self, proof: &ProofDocument) -> Result<VerifiedProof, VerificationError> {
        if self.should_fail {
            return Err(VerificationError::new("mock verifier rejection"));
        }

        let words =
            bytes_to_words(proof.as_bytes()).map_err(|e| VerificationError::new(e.to_string()))?;
        if words.len() != DIGEST_WORDS + ATTESTATION_WORDS {
            return Err(VerificationError::new(format!(
                "malformed proof: {} words",
                words.len()
            )));
        }

        let mut identity = [0u32; DIGEST_WORDS];
        identity.copy_from_slice(&words[..DIGEST_WORDS]);
        let public_output = Attestation::from_words(&words[DIGEST_WORDS..])
            .map_err(|e| VerificationError::new(e.to_string()))?;

        Ok(VerifiedProof {
            circuit_identity: CircuitIdentity::new(Digest::new(identity)),
            public_output,
        })
    }
}
