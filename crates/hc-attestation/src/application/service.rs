//! # Attestation Service
//!
//! Application service wiring the header validator and proof verifier into
//! the chaining and aggregation algorithms.

use crate::adapters::BitcoinHeaderValidator;
use crate::algorithms::{aggregate, chain_segment_with_state};
use crate::config::AttestationConfig;
use crate::domain::{
    AggregatedRange, Attestation, AttestationError, ChainState, CircuitIdentityPins, PriorProof,
    Result, TaskResult, PINS_V1,
};
use crate::ports::{AttestationApi, HeaderValidator, ProofStore, ProofVerifier, SegmentProver};

/// Attestation Service - orchestrates segment chaining and aggregation.
pub struct AttestationService<V: HeaderValidator, P: ProofVerifier> {
    /// Configuration.
    config: AttestationConfig,
    /// Per-block consensus rules.
    validator: V,
    /// Verifier for prior proofs.
    verifier: P,
    /// Sanctioned circuit identities.
    pins: CircuitIdentityPins,
}

impl<P: ProofVerifier> AttestationService<BitcoinHeaderValidator, P> {
    /// Create a service validating Bitcoin headers for `config.network`.
    pub fn bitcoin(config: AttestationConfig, verifier: P) -> Self {
        let validator = BitcoinHeaderValidator::new(config.network.params());
        Self::new(config, validator, verifier)
    }
}

impl<V: HeaderValidator, P: ProofVerifier> AttestationService<V, P> {
    /// Create a new service using the v1 pin set.
    pub fn new(config: AttestationConfig, validator: V, verifier: P) -> Self {
        Self {
            config,
            validator,
            verifier,
            pins: PINS_V1,
        }
    }

    /// Replace the pin set.
    pub fn with_pins(mut self, pins: CircuitIdentityPins) -> Self {
        self.pins = pins;
        self
    }

    /// Get configuration.
    pub fn config(&self) -> &AttestationConfig {
        &self.config
    }

    /// Get the active pin set.
    pub fn pins(&self) -> &CircuitIdentityPins {
        &self.pins
    }

    /// Get the header validator.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Internal: reject oversized batches.
    fn check_batch_size(&self, len: usize) -> Result<()> {
        if len > self.config.max_batch_size {
            return Err(AttestationError::Structural(format!(
                "batch of {} blocks exceeds maximum {}",
                len, self.config.max_batch_size
            )));
        }
        Ok(())
    }

    /// Internal: chain one batch, returning the attestation and final state.
    fn prove_segment_inner(
        &self,
        initial: &ChainState,
        blocks: &[V::Block],
        prior: &PriorProof,
    ) -> Result<(Attestation, ChainState)> {
        self.check_batch_size(blocks.len())?;

        let result = chain_segment_with_state(
            &self.validator,
            &self.verifier,
            &self.pins,
            initial,
            blocks,
            prior,
        );

        match &result {
            Ok((attestation, _)) => tracing::info!(
                prev_height = attestation.prev_height,
                new_height = attestation.new_height,
                new_state_hash = %attestation.new_state_hash,
                "segment attested"
            ),
            Err(e) => tracing::warn!(
                category = e.category(),
                height = initial.height,
                "segment rejected: {}",
                e
            ),
        }
        result
    }

    /// Prove `blocks` in consecutive batches of `step`.
    ///
    /// Each batch continues from the proof of the one before it; the first
    /// continues `prior`. Every proof is stored under its segment's final
    /// height. Stops at the first failure.
    pub fn prove_range<R, S>(
        &self,
        initial: &ChainState,
        blocks: &[V::Block],
        step: usize,
        prior: PriorProof,
        prover: &R,
        store: &S,
    ) -> Result<Vec<Attestation>>
    where
        R: SegmentProver,
        S: ProofStore,
    {
        if step == 0 {
            return Err(AttestationError::Structural(
                "step must be greater than zero".to_string(),
            ));
        }
        self.check_batch_size(step.min(blocks.len()))?;

        let mut state = initial.clone();
        let mut prior = prior;
        let mut attestations = Vec::with_capacity(blocks.len().div_ceil(step));

        for batch in blocks.chunks(step) {
            let (attestation, next) = self.prove_segment_inner(&state, batch, &prior)?;

            let proof = prover.prove(&attestation).map_err(|e| {
                tracing::warn!(new_height = attestation.new_height, "proving failed: {}", e);
                AttestationError::from(e)
            })?;
            store.store(attestation.new_height, proof.clone());

            prior = PriorProof::Continuation(proof);
            state = next;
            attestations.push(attestation);
        }

        tracing::info!(
            segments = attestations.len(),
            from = initial.height,
            to = state.height,
            "range proven"
        );
        Ok(attestations)
    }
}

/// Where to resume proving from, given the proofs already stored.
///
/// Returns the height of the latest proof and the proof to continue, or
/// height 0 and [`PriorProof::Genesis`] for an empty store.
pub fn resume_point<S: ProofStore>(store: &S) -> Result<(u32, PriorProof)> {
    match store.latest_height() {
        None => Ok((0, PriorProof::Genesis)),
        Some(height) => store
            .load(height)
            .map(|proof| (height, PriorProof::Continuation(proof)))
            .ok_or_else(|| {
                AttestationError::Structural(format!("proof at height {} is missing", height))
            }),
    }
}

impl<V: HeaderValidator, P: ProofVerifier> AttestationApi for AttestationService<V, P> {
    type Block = V::Block;

    fn prove_segment(
        &self,
        initial: &ChainState,
        blocks: &[V::Block],
        prior: &PriorProof,
    ) -> Result<Attestation> {
        self.prove_segment_inner(initial, blocks, prior)
            .map(|(attestation, _)| attestation)
    }

    fn aggregate(&self, results: &[TaskResult]) -> Result<AggregatedRange> {
        let result = aggregate(results, &self.pins);
        match &result {
            Ok(range) => tracing::info!(
                segments = results.len(),
                prev_height = range.prev_height,
                new_height = range.new_height,
                "range aggregated"
            ),
            Err(e) => tracing::warn!(category = e.category(), "aggregation rejected: {}", e),
        }
        result
    }
}
