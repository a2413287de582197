//! # Bitcoin Header Validator
//!
//! Reference implementation of the header validator port for Bitcoin block
//! headers.
//!
//! ## Rules
//!
//! 1. Parent linkage: `prev_block_hash == state.best_block_hash`
//! 2. Declared bits match the expected target
//! 3. Proof-of-work: `hash <= target`
//! 4. Timestamp strictly above median-time-past
//! 5. Difficulty adjustment every 2016 blocks, clamped to [T/4, 4T]

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::domain::{ChainState, Digest, ValidationError, DIGEST_BYTES};
use crate::ports::HeaderValidator;

/// Blocks between difficulty adjustments.
pub const BLOCKS_PER_EPOCH: u32 = 2016;

/// Expected duration of one epoch, in seconds.
pub const TARGET_TIMESPAN: u32 = BLOCKS_PER_EPOCH * 600;

/// Serialized header length.
pub const HEADER_BYTES: usize = 80;

/// Bitcoin network selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production chain.
    #[default]
    Mainnet,
    /// Local test chain without difficulty adjustment.
    Regtest,
}

impl Network {
    /// Consensus parameters for this network.
    pub fn params(self) -> NetworkParams {
        match self {
            Self::Mainnet => NetworkParams::mainnet(),
            Self::Regtest => NetworkParams::regtest(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Regtest => write!(f, "regtest"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Self::Mainnet),
            "regtest" => Ok(Self::Regtest),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}

/// Difficulty parameters of a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkParams {
    /// Network these parameters belong to.
    pub network: Network,
    /// Easiest allowed target.
    pub pow_limit: U256,
    /// Keep the target fixed forever.
    pub no_retargeting: bool,
}

impl NetworkParams {
    /// Bitcoin mainnet.
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            pow_limit: U256::from(0xffffu64) << 208,
            no_retargeting: false,
        }
    }

    /// Bitcoin regtest.
    pub fn regtest() -> Self {
        Self {
            network: Network::Regtest,
            pow_limit: U256::from(0x7f_ffffu64) << 232,
            no_retargeting: true,
        }
    }
}

/// Bitcoin block header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block version.
    pub version: u32,
    /// Hash of the parent block.
    pub prev_block_hash: Digest,
    /// Merkle root of the block's transactions.
    pub merkle_root: Digest,
    /// Block timestamp.
    pub time: u32,
    /// Compact target.
    pub bits: u32,
    /// Nonce.
    pub nonce: u32,
}

impl BlockHeader {
    /// Consensus serialization (80 bytes).
    pub fn to_bytes(&self) -> [u8; HEADER_BYTES] {
        let mut bytes = [0u8; HEADER_BYTES];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&self.prev_block_hash.to_bytes());
        bytes[36..68].copy_from_slice(&self.merkle_root.to_bytes());
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Double SHA-256 of the serialized header.
    pub fn hash(&self) -> Digest {
        let first = Sha256::digest(self.to_bytes());
        let second = Sha256::digest(first);

        let mut raw = [0u8; DIGEST_BYTES];
        raw.copy_from_slice(&second);
        Digest::from_bytes(raw)
    }
}

// =============================================================================
// Target arithmetic
// =============================================================================

/// Expand compact bits into a target.
pub fn bits_to_target(bits: u32) -> Result<U256, ValidationError> {
    let exponent = bits >> 24;
    let mantissa = bits & 0x007f_ffff;

    if bits & 0x0080_0000 != 0 && mantissa != 0 {
        return Err(ValidationError::new(format!("negative target: {:#010x}", bits)));
    }

    let overflow = mantissa != 0
        && (exponent > 34
            || (mantissa > 0xff && exponent > 33)
            || (mantissa > 0xffff && exponent > 32));
    if overflow {
        return Err(ValidationError::new(format!("target overflow: {:#010x}", bits)));
    }

    let mantissa = U256::from(mantissa);
    Ok(if exponent <= 3 {
        mantissa >> (8 * (3 - exponent) as usize)
    } else {
        mantissa << (8 * (exponent - 3) as usize)
    })
}

/// Compress a target into compact bits.
pub fn target_to_bits(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        target.low_u64() << (8 * (3 - size))
    } else {
        (target >> (8 * (size - 3))).low_u64()
    };

    // A set high bit would read back as negative.
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }

    (compact as u32) | ((size as u32) << 24)
}

/// Expected number of hashes to find a block at `target`.
pub fn work_from_target(target: U256) -> U256 {
    (!target / (target + U256::one())) + U256::one()
}

/// Target for the next epoch given the time the closing epoch took.
///
/// The result is clamped to the pow limit and normalized through the
/// compact encoding.
pub fn retarget(current_target: U256, actual_timespan: u32, params: &NetworkParams) -> U256 {
    let timespan = actual_timespan.clamp(TARGET_TIMESPAN / 4, TARGET_TIMESPAN * 4);
    let timespan = U256::from(timespan);
    let expected = U256::from(TARGET_TIMESPAN);

    let next = match current_target.checked_mul(timespan) {
        Some(product) => product / expected,
        None => (current_target / expected) * timespan,
    };
    let next = next.min(params.pow_limit);

    // Compact round-trip cannot fail for values at or below the pow limit.
    bits_to_target(target_to_bits(next)).unwrap_or(next)
}

// =============================================================================
// Validator
// =============================================================================

/// Header validator applying Bitcoin consensus rules.
#[derive(Clone, Copy, Debug)]
pub struct BitcoinHeaderValidator {
    params: NetworkParams,
}

impl BitcoinHeaderValidator {
    /// Create a validator for the given network parameters.
    pub fn new(params: NetworkParams) -> Self {
        Self { params }
    }

    /// Network parameters in use.
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }
}

impl Default for BitcoinHeaderValidator {
    fn default() -> Self {
        Self::new(NetworkParams::mainnet())
    }
}

impl HeaderValidator for BitcoinHeaderValidator {
    type Block = BlockHeader;

    fn validate(
        &self,
        state: &ChainState,
        header: &BlockHeader,
    ) -> Result<ChainState, ValidationError> {
        let height = state
            .height
            .checked_add(1)
            .ok_or_else(|| ValidationError::new("height overflow"))?;

        if header.prev_block_hash != state.best_block_hash {
            return Err(ValidationError::new(format!(
                "prev block hash mismatch: expected {}, got {}",
                state.best_block_hash, header.prev_block_hash
            )));
        }

        let expected_bits = target_to_bits(state.current_target);
        if header.bits != expected_bits {
            return Err(ValidationError::new(format!(
                "bits mismatch: expected {:#010x}, got {:#010x}",
                expected_bits, header.bits
            )));
        }
        let target = bits_to_target(header.bits)?;
        if target.is_zero() {
            return Err(ValidationError::new("target is zero"));
        }

        let block_hash = header.hash();
        if block_hash.to_u256() > target {
            return Err(ValidationError::new(format!(
                "insufficient proof-of-work: hash {} above target",
                block_hash
            )));
        }

        let median = state.median_time_past();
        if header.time <= median {
            return Err(ValidationError::new(format!(
                "timestamp {} not above median time past {}",
                header.time, median
            )));
        }

        let total_work = state
            .total_work
            .checked_add(work_from_target(target))
            .ok_or_else(|| ValidationError::new("total work overflow"))?;

        let epoch_start_time = if height % BLOCKS_PER_EPOCH == 0 {
            header.time
        } else {
            state.epoch_start_time
        };

        let closes_epoch = height % BLOCKS_PER_EPOCH == BLOCKS_PER_EPOCH - 1;
        let current_target = if !self.params.no_retargeting && closes_epoch {
            let timespan = header.time.saturating_sub(epoch_start_time);
            let next = retarget(target, timespan, &self.params);
            tracing::debug!(
                height,
                timespan,
                bits = target_to_bits(next),
                "difficulty adjusted"
            );
            next
        } else {
            target
        };

        Ok(ChainState {
            height,
            total_work,
            best_block_hash: block_hash,
            current_target,
            epoch_start_time,
            prev_timestamps: state.next_prev_timestamps(header.time),
        })
    }
}
