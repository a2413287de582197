//! # Chain State
//!
//! The summarized chain position and its v1 digest.

use blake2::{Blake2s256, Digest as _};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::digest::{Digest, DIGEST_WORDS};
use super::invariants::{
    GENESIS_BLOCK_HASH, GENESIS_TIMESTAMP, GENESIS_TOTAL_WORK, MAX_PREV_TIMESTAMPS, MAX_TARGET,
};

/// Identifier of the chain-state serialization and hash scheme.
pub const HASH_SCHEME_VERSION: &str = "v1";

/// Minimal summary of a blockchain position, enough to validate the next
/// header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainState {
    /// Height of the chain tip.
    pub height: u32,
    /// Cumulative proof-of-work.
    pub total_work: U256,
    /// Hash of the chain tip.
    pub best_block_hash: Digest,
    /// Difficulty target for the next block.
    pub current_target: U256,
    /// Timestamp of the first block of the current difficulty epoch.
    pub epoch_start_time: u32,
    /// Recent block timestamps, oldest first (at most 11).
    pub prev_timestamps: Vec<u32>,
}

impl ChainState {
    /// The fixed genesis state (Bitcoin mainnet).
    pub fn genesis() -> Self {
        Self {
            height: 0,
            total_work: U256::from(GENESIS_TOTAL_WORK),
            best_block_hash: GENESIS_BLOCK_HASH,
            current_target: MAX_TARGET.to_u256(),
            epoch_start_time: GENESIS_TIMESTAMP,
            prev_timestamps: vec![GENESIS_TIMESTAMP],
        }
    }

    /// Check whether this is exactly the genesis constant.
    pub fn is_genesis(&self) -> bool {
        *self == Self::genesis()
    }

    /// Median of the recorded timestamps (median-time-past).
    ///
    /// Returns 0 when no timestamps are recorded.
    pub fn median_time_past(&self) -> u32 {
        if self.prev_timestamps.is_empty() {
            return 0;
        }
        let mut sorted = self.prev_timestamps.clone();
        sorted.sort_unstable();
        sorted[sorted.len() / 2]
    }

    /// Timestamp list after appending `timestamp`, trimmed to the last 11.
    pub fn next_prev_timestamps(&self, timestamp: u32) -> Vec<u32> {
        let mut next = self.prev_timestamps.clone();
        next.push(timestamp);
        if next.len() > MAX_PREV_TIMESTAMPS {
            let excess = next.len() - MAX_PREV_TIMESTAMPS;
            next.drain(..excess);
        }
        next
    }

    /// Word serialization fed to the hash, in protocol order.
    ///
    /// `height`, `total_work` (8), `best_block_hash` (8),
    /// `current_target` (8), `epoch_start_time`, then each timestamp.
    pub fn to_words(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(2 + 3 * DIGEST_WORDS + self.prev_timestamps.len());
        words.push(self.height);
        words.extend_from_slice(&Digest::from_u256(self.total_work).words);
        words.extend_from_slice(&self.best_block_hash.words);
        words.extend_from_slice(&Digest::from_u256(self.current_target).words);
        words.push(self.epoch_start_time);
        words.extend_from_slice(&self.prev_timestamps);
        words
    }

    /// Blake2s-256 digest of [`ChainState::to_words`].
    ///
    /// Words enter the hash as little-endian bytes, and the result is
    /// reported in Blake2s native word order (`h0..h7`). The big-endian
    /// display hex of the returned digest is therefore not the raw Blake2s
    /// output hex.
    pub fn hash(&self) -> Digest {
        let mut hasher = Blake2s256::new();
        for word in self.to_words() {
            hasher.update(word.to_le_bytes());
        }
        let output = hasher.finalize();

        let mut words = [0u32; DIGEST_WORDS];
        for (word, chunk) in words.iter_mut().zip(output.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Digest::new(words)
    }
}
