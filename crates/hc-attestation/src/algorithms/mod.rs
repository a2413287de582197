//! # Algorithms Module
//!
//! Pure attestation logic: batch validation, segment chaining and
//! aggregation.

pub mod aggregator;
pub mod batch_validator;
pub mod segment_chainer;

pub use aggregator::aggregate;
pub use batch_validator::validate_batch;
pub use segment_chainer::{chain_segment, chain_segment_with_state};
