//! # Aggregator
//!
//! Folds a contiguous run of verified segments into one range statement.
//!
//! Only cross-segment consistency is checked here. Each interior task must
//! declare the pinned identity; the final task is exempt because it may
//! carry a newer program than the pinned interior set.

use crate::domain::{
    AggregatedRange, AttestationError, CircuitIdentityPins, ContinuityMismatch, IdentityMismatch,
    Result, TaskResult,
};

/// Aggregate `results`, failing fast on the first broken invariant.
pub fn aggregate(results: &[TaskResult], pins: &CircuitIdentityPins) -> Result<AggregatedRange> {
    let (first, last) = match (results.first(), results.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(AttestationError::Structural(
                "cannot aggregate an empty sequence".to_string(),
            ))
        }
    };

    let pinned = pins.task_identity();

    for (i, pair) in results.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let index = i + 1;

        if next.prev_state_hash != prev.new_state_hash {
            return Err(AttestationError::Continuity {
                index,
                mismatch: ContinuityMismatch::StateHash {
                    expected: prev.new_state_hash,
                    actual: next.prev_state_hash,
                },
            });
        }

        if next.prev_height != prev.new_height {
            return Err(AttestationError::Continuity {
                index,
                mismatch: ContinuityMismatch::Height {
                    expected: prev.new_height,
                    actual: next.prev_height,
                },
            });
        }

        if prev.identity.bootloader_hash != pinned.bootloader_hash {
            return Err(IdentityMismatch::UnexpectedCircuitIdentity {
                index: i,
                field: "bootloader_hash",
                expected: pinned.bootloader_hash,
                actual: prev.identity.bootloader_hash,
            }
            .into());
        }

        if prev.identity.program_hash != pinned.program_hash {
            return Err(IdentityMismatch::UnexpectedCircuitIdentity {
                index: i,
                field: "program_hash",
                expected: pinned.program_hash.0,
                actual: prev.identity.program_hash.0,
            }
            .into());
        }
    }

    Ok(AggregatedRange {
        prev_height: first.prev_height,
        new_height: last.new_height,
        prev_state_hash: first.prev_state_hash,
        new_state_hash: last.new_state_hash,
    })
}
