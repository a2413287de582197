//! # Batch Validator
//!
//! Threads a chain state through an ordered batch of blocks.

use crate::domain::{AttestationError, ChainState, Result};
use crate::ports::HeaderValidator;

/// Validate `blocks` in order starting from `initial`.
///
/// Each block is validated against the state produced by its predecessor.
/// The first rejection aborts the whole batch; no partial state is
/// returned. An empty batch yields `initial` unchanged.
///
/// # Checks on the validator output
/// 1. Height advances by exactly one
/// 2. Total work does not decrease
pub fn validate_batch<V: HeaderValidator>(
    validator: &V,
    initial: &ChainState,
    blocks: &[V::Block],
) -> Result<ChainState> {
    let mut state = initial.clone();

    for (index, block) in blocks.iter().enumerate() {
        let height = state.height.checked_add(1).ok_or_else(|| {
            AttestationError::Structural(format!("height overflow after {}", state.height))
        })?;

        let next = validator
            .validate(&state, block)
            .map_err(|e| AttestationError::HeaderValidation {
                index,
                height,
                reason: e.reason,
            })?;

        if next.height != height {
            return Err(AttestationError::HeaderValidation {
                index,
                height,
                reason: format!("validator produced height {}", next.height),
            });
        }

        if next.total_work < state.total_work {
            return Err(AttestationError::HeaderValidation {
                index,
                height,
                reason: "validator decreased total work".to_string(),
            });
        }

        tracing::debug!(
            height = next.height,
            block_hash = %next.best_block_hash,
            "block validated"
        );
        state = next;
    }

    Ok(state)
}
