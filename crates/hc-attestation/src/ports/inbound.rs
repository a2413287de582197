//! # Inbound Ports
//!
//! API trait defining what the attestation service can do.

use crate::domain::{AggregatedRange, Attestation, ChainState, PriorProof, Result, TaskResult};

/// Attestation API - inbound port.
pub trait AttestationApi {
    /// Block type accepted by the service's header validator.
    type Block;

    /// Validate `blocks` on top of `initial` and emit one attestation,
    /// continuing `prior` or bootstrapping from genesis.
    fn prove_segment(
        &self,
        initial: &ChainState,
        blocks: &[Self::Block],
        prior: &PriorProof,
    ) -> Result<Attestation>;

    /// Fold a contiguous run of verified segments into one range.
    fn aggregate(&self, results: &[TaskResult]) -> Result<AggregatedRange>;
}
