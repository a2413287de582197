//! # Adapters Module
//!
//! Concrete implementations of the outbound ports.

pub mod bitcoin_header;
pub mod memory_store;

pub use bitcoin_header::{
    bits_to_target, retarget, target_to_bits, work_from_target, BitcoinHeaderValidator,
    BlockHeader, Network, NetworkParams, BLOCKS_PER_EPOCH, HEADER_BYTES, TARGET_TIMESPAN,
};
pub use memory_store::InMemoryProofStore;
