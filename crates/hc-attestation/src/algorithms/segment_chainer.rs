//! # Segment Chainer
//!
//! Produces one attestation per call, either continuing a verified proof
//! chain or bootstrapping from genesis.
//!
//! ## Algorithm
//!
//! 1. Continuation: verify the prior proof, check its circuit identity
//!    against the pinned allow-list and bind the declared initial state to
//!    the prior attestation's final state hash and height.
//! 2. Genesis: the declared initial state must equal the genesis constant.
//! 3. Validate the batch from the declared initial state.
//! 4. Emit the attestation.

use crate::domain::{
    Attestation, AttestationError, ChainState, CircuitIdentity, CircuitIdentityPins,
    ContinuityMismatch, IdentityMismatch, PriorProof, Result,
};
use crate::ports::{HeaderValidator, ProofVerifier};

use super::batch_validator::validate_batch;

/// Build the attestation for `blocks` on top of `initial`.
pub fn chain_segment<V, P>(
    header_validator: &V,
    proof_verifier: &P,
    pins: &CircuitIdentityPins,
    initial: &ChainState,
    blocks: &[V::Block],
    prior: &PriorProof,
) -> Result<Attestation>
where
    V: HeaderValidator,
    P: ProofVerifier,
{
    chain_segment_with_state(header_validator, proof_verifier, pins, initial, blocks, prior)
        .map(|(attestation, _)| attestation)
}

/// Same as [`chain_segment`], also returning the final chain state so the
/// next segment can start from it.
pub fn chain_segment_with_state<V, P>(
    header_validator: &V,
    proof_verifier: &P,
    pins: &CircuitIdentityPins,
    initial: &ChainState,
    blocks: &[V::Block],
    prior: &PriorProof,
) -> Result<(Attestation, ChainState)>
where
    V: HeaderValidator,
    P: ProofVerifier,
{
    let initial_hash = initial.hash();

    let carried_circuit_identity = match prior {
        PriorProof::Continuation(document) => {
            let verified = proof_verifier.verify(document)?;

            if !pins.is_sanctioned(&verified.circuit_identity) {
                return Err(IdentityMismatch::NotSanctioned {
                    actual: verified.circuit_identity,
                    version: pins.version,
                    allowed: pins.sanctioned,
                }
                .into());
            }

            let embedded = verified.public_output.carried_circuit_identity;
            if !embedded.is_sentinel() && !pins.is_sanctioned(&embedded) {
                return Err(IdentityMismatch::EmbeddedNotSanctioned {
                    actual: embedded,
                    version: pins.version,
                    allowed: pins.sanctioned,
                }
                .into());
            }

            if initial_hash != verified.public_output.new_state_hash {
                return Err(AttestationError::Continuity {
                    index: 0,
                    mismatch: ContinuityMismatch::InitialState {
                        expected: verified.public_output.new_state_hash,
                        actual: initial_hash,
                    },
                });
            }

            if initial.height != verified.public_output.new_height {
                return Err(AttestationError::Continuity {
                    index: 0,
                    mismatch: ContinuityMismatch::Height {
                        expected: verified.public_output.new_height,
                        actual: initial.height,
                    },
                });
            }

            verified.circuit_identity
        }
        PriorProof::Genesis => {
            if !initial.is_genesis() {
                return Err(AttestationError::Continuity {
                    index: 0,
                    mismatch: ContinuityMismatch::NotGenesis {
                        actual: initial_hash,
                    },
                });
            }
            CircuitIdentity::GENESIS_SENTINEL
        }
    };

    let final_state = validate_batch(header_validator, initial, blocks)?;

    let attestation = Attestation {
        prev_height: initial.height,
        new_height: final_state.height,
        prev_state_hash: initial_hash,
        new_state_hash: final_state.hash(),
        carried_circuit_identity,
    };
    Ok((attestation, final_state))
}
