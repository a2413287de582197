//! # Proof Chain Forgeries
//!
//! | Attack | Expected rejection |
//! |--------|--------------------|
//! | Rewind: continue a proof from an earlier state | continuity (initial state) |
//! | Relabel: proof from an unsanctioned circuit | identity |
//! | Fake genesis: bootstrap from a custom state | continuity (not genesis) |
//! | Splice: aggregate segments from two forks | continuity (state hash) |
//! | Gap: aggregate with a missing segment | continuity (state hash) |
//! | Interior swap: unpinned program mid-range | identity |

#[cfg(test)]
mod tests {
    use hc_attestation::{
        AttestationApi, AttestationError, ChainState, CircuitIdentity, ContinuityMismatch, Digest,
        IdentityMismatch, MockBlock, MockProofVerifier, PriorProof, TaskResult, PINS_V1,
    };

    use crate::fixtures::{mock_chain, mock_service};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Prove `count` one-block segments from genesis, returning task results.
    fn honest_results(count: usize) -> Vec<TaskResult> {
        let service = mock_service();
        let store = hc_attestation::InMemoryProofStore::new();
        service
            .prove_range(
                &ChainState::genesis(),
                &mock_chain(count),
                1,
                PriorProof::Genesis,
                &hc_attestation::MockProver::new(PINS_V1.program_hash),
                &store,
            )
            .unwrap()
            .iter()
            .map(|a| TaskResult::from_attestation(PINS_V1.task_identity(), a))
            .collect()
    }

    // =============================================================================
    // CHAINER ATTACKS
    // =============================================================================

    #[test]
    fn test_rewind_to_genesis_with_continuation() {
        let service = mock_service();
        let blocks = mock_chain(2);
        let first = service
            .prove_segment(&ChainState::genesis(), &blocks[..1], &PriorProof::Genesis)
            .unwrap();

        // Claim the prior proof ended at genesis and re-prove block 1.
        let proof = MockProofVerifier::document(PINS_V1.program_hash, &first);
        let err = service
            .prove_segment(&ChainState::genesis(), &blocks[..1], &PriorProof::Continuation(proof))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Continuity {
                mismatch: ContinuityMismatch::InitialState { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_relabelled_circuit() {
        let service = mock_service();
        let blocks = mock_chain(1);
        let first = service
            .prove_segment(&ChainState::genesis(), &blocks, &PriorProof::Genesis)
            .unwrap();

        let rogue = CircuitIdentity::new(Digest::new([0xdead_beef; 8]));
        let proof = MockProofVerifier::document(rogue, &first);
        let state1 = ChainState {
            height: 1,
            ..ChainState::genesis()
        };
        let err = service
            .prove_segment(&state1, &[], &PriorProof::Continuation(proof))
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Identity(IdentityMismatch::NotSanctioned { .. })
        ));
    }

    #[test]
    fn test_fake_genesis() {
        let service = mock_service();
        let mut fake = ChainState::genesis();
        fake.total_work = fake.total_work * primitive_types::U256::from(1000u64);

        let blocks = MockBlock::chain(fake.best_block_hash, fake.epoch_start_time, 1);
        let err = service
            .prove_segment(&fake, &blocks, &PriorProof::Genesis)
            .unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Continuity {
                mismatch: ContinuityMismatch::NotGenesis { .. },
                ..
            }
        ));
    }

    // =============================================================================
    // AGGREGATION ATTACKS
    // =============================================================================

    #[test]
    fn test_splice_two_forks() {
        let service = mock_service();
        let honest = honest_results(3);

        // A fork diverging at height 1 with its own state hashes.
        let mut fork = honest[1];
        fork.prev_state_hash = Digest::new([0xf0; 8]);
        fork.new_state_hash = Digest::new([0xf1; 8]);

        let spliced = [honest[0], fork, honest[2]];
        let err = service.aggregate(&spliced).unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Continuity {
                index: 1,
                mismatch: ContinuityMismatch::StateHash { .. },
            }
        ));
    }

    #[test]
    fn test_gap_in_range() {
        let service = mock_service();
        let honest = honest_results(3);

        let err = service.aggregate(&[honest[0], honest[2]]).unwrap_err();
        assert_eq!(err.category(), "continuity");
    }

    #[test]
    fn test_interior_unpinned_program() {
        let service = mock_service();
        let mut results = honest_results(3);
        results[0].identity.program_hash = CircuitIdentity::new(Digest::new([1; 8]));

        let err = service.aggregate(&results).unwrap_err();
        assert!(matches!(
            err,
            AttestationError::Identity(IdentityMismatch::UnexpectedCircuitIdentity { index: 0, .. })
        ));

        // A newer program on the tail segment is accepted.
        let mut results = honest_results(3);
        results[2].identity.program_hash = CircuitIdentity::new(Digest::new([1; 8]));
        assert!(service.aggregate(&results).is_ok());
    }
}
