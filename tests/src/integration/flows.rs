//! # Integration Test Flows
//!
//! Genesis bootstrap, continuation and aggregation wired through
//! [`AttestationService`](hc_attestation::AttestationService).
//!
//! ## Flow Tested:
//!
//! 1. **Genesis → block 1**: bootstrap attestation with the zero sentinel
//! 2. **Block 1 → block 2**: continuation from the first segment's proof
//! 3. **Aggregation**: both segments collapse into one range

#[cfg(test)]
mod tests {
    use hc_attestation::{
        resume_point, AttestationApi, AttestationError, ChainState, HeaderValidator,
        InMemoryProofStore, MockHeaderValidator, MockProofVerifier, MockProver, PriorProof,
        ProofStore, TaskResult, GENESIS_STATE_HASH, PINS_V1,
    };

    use crate::fixtures::{mock_chain, mock_service};

    // =============================================================================
    // ATTESTATION CHAIN: GENESIS → CONTINUATION → AGGREGATE
    // =============================================================================

    #[test]
    fn test_two_segments_then_aggregate() {
        let service = mock_service();
        let validator = MockHeaderValidator::default();
        let blocks = mock_chain(2);

        let genesis = ChainState::genesis();
        let state1 = validator.validate(&genesis, &blocks[0]).unwrap();
        let state2 = validator.validate(&state1, &blocks[1]).unwrap();

        // Segment 1: genesis bootstrap.
        let first = service
            .prove_segment(&genesis, &blocks[..1], &PriorProof::Genesis)
            .unwrap();
        assert_eq!(first.prev_height, 0);
        assert_eq!(first.new_height, 1);
        assert_eq!(first.prev_state_hash, GENESIS_STATE_HASH);
        assert_eq!(first.new_state_hash, state1.hash());

        // Segment 2: continue from segment 1's proof.
        let proof = MockProofVerifier::document(PINS_V1.program_hash, &first);
        let second = service
            .prove_segment(&state1, &blocks[1..], &PriorProof::Continuation(proof))
            .unwrap();
        assert_eq!(second.prev_height, 1);
        assert_eq!(second.new_height, 2);
        assert_eq!(second.prev_state_hash, state1.hash());
        assert_eq!(second.new_state_hash, state2.hash());

        // Aggregate both.
        let identity = PINS_V1.task_identity();
        let results = [
            TaskResult::from_attestation(identity, &first),
            TaskResult::from_attestation(identity, &second),
        ];
        let range = service.aggregate(&results).unwrap();
        assert_eq!(range.prev_height, 0);
        assert_eq!(range.new_height, 2);
        assert_eq!(range.prev_state_hash, genesis.hash());
        assert_eq!(range.new_state_hash, state2.hash());
    }

    #[test]
    fn test_task_results_survive_word_encoding() {
        let service = mock_service();
        let blocks = mock_chain(6);
        let store = InMemoryProofStore::new();
        let attestations = service
            .prove_range(
                &ChainState::genesis(),
                &blocks,
                2,
                PriorProof::Genesis,
                &MockProver::new(PINS_V1.program_hash),
                &store,
            )
            .unwrap();

        // Results typically arrive serialized from the verifier.
        let identity = PINS_V1.task_identity();
        let results: Vec<TaskResult> = attestations
            .iter()
            .map(|a| TaskResult::from_attestation(identity, a).to_words())
            .map(|words| TaskResult::from_words(&words).unwrap())
            .collect();

        let range = service.aggregate(&results).unwrap();
        assert_eq!((range.prev_height, range.new_height), (0, 6));
    }

    // =============================================================================
    // RANGE DRIVER: RESUME FROM STORE
    // =============================================================================

    #[test]
    fn test_resume_after_partial_run() {
        let blocks = mock_chain(9);
        let store = InMemoryProofStore::new();
        let prover = MockProver::new(PINS_V1.program_hash);

        // First run breaks at height 5.
        let failing = hc_attestation::AttestationService::new(
            hc_attestation::AttestationConfig::for_testing(),
            MockHeaderValidator::failing_at(5),
            MockProofVerifier::default(),
        );
        let err = failing
            .prove_range(&ChainState::genesis(), &blocks, 3, PriorProof::Genesis, &prover, &store)
            .unwrap_err();
        assert!(matches!(err, AttestationError::HeaderValidation { height: 5, .. }));
        assert_eq!(store.latest_height(), Some(3));

        // Second run picks up from the stored proof.
        let (height, prior) = resume_point(&store).unwrap();
        assert_eq!(height, 3);

        let validator = MockHeaderValidator::default();
        let mut state = ChainState::genesis();
        for block in &blocks[..height as usize] {
            state = validator.validate(&state, block).unwrap();
        }

        let service = mock_service();
        let resumed = service
            .prove_range(&state, &blocks[height as usize..], 3, prior, &prover, &store)
            .unwrap();
        assert_eq!(resumed.len(), 2);
        assert_eq!(resumed[0].prev_height, 3);
        assert_eq!(store.latest_height(), Some(9));
    }

    #[test]
    fn test_batch_failure_commits_nothing() {
        let service = hc_attestation::AttestationService::new(
            hc_attestation::AttestationConfig::for_testing(),
            MockHeaderValidator::failing_at(3),
            MockProofVerifier::default(),
        );
        let blocks = mock_chain(4);

        let result = service.prove_segment(&ChainState::genesis(), &blocks, &PriorProof::Genesis);
        assert!(matches!(
            result,
            Err(AttestationError::HeaderValidation { index: 2, .. })
        ));
    }
}
