//! # Domain Invariants
//!
//! Protocol constants and the pinned circuit identities.

use super::attestation::{CircuitIdentity, TaskIdentity};
use super::digest::Digest;

/// Maximum number of timestamps kept in a chain state.
pub const MAX_PREV_TIMESTAMPS: usize = 11;

/// Timestamp of the genesis block.
pub const GENESIS_TIMESTAMP: u32 = 1_231_006_505;

/// Work of one block mined at [`MAX_TARGET`].
pub const GENESIS_TOTAL_WORK: u64 = 0x1_0001_0001;

/// Hash of the genesis block
/// (`000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f`).
pub const GENESIS_BLOCK_HASH: Digest = Digest::new([
    0x6fe28c0a, 0xb6f1b372, 0xc1a6a246, 0xae63f74f, 0x931e8365, 0xe15a089c, 0x68d61900,
    0x00000000,
]);

/// Maximal mainnet target (compact bits `0x1d00ffff`).
pub const MAX_TARGET: Digest = Digest::new([0, 0, 0, 0, 0, 0, 0x0000ffff, 0]);

/// Digest of [`ChainState::genesis`](super::chain_state::ChainState::genesis)
/// under hash scheme v1.
pub const GENESIS_STATE_HASH: Digest = Digest::new([
    0x11ea3522, 0x8b85615f, 0x842e4779, 0xff19f834, 0xcb10f434, 0x65acb0cf, 0xb322377a,
    0xc26e68dc,
]);

/// Versioned set of sanctioned circuit identities.
///
/// `sanctioned` is the allow-list a continuation proof must be produced
/// by. `bootloader_hash` and `program_hash` are the identity fields every
/// interior task of an aggregation must declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircuitIdentityPins {
    /// Pin set version.
    pub version: &'static str,
    /// Program identities accepted for continuation proofs.
    pub sanctioned: &'static [CircuitIdentity],
    /// Bootloader every interior task must run under.
    pub bootloader_hash: Digest,
    /// Program every interior task must run.
    pub program_hash: CircuitIdentity,
}

impl CircuitIdentityPins {
    /// Check allow-list membership.
    pub fn is_sanctioned(&self, identity: &CircuitIdentity) -> bool {
        self.sanctioned.contains(identity)
    }

    /// The identity fields interior tasks must declare.
    pub fn task_identity(&self) -> TaskIdentity {
        TaskIdentity {
            bootloader_hash: self.bootloader_hash,
            program_hash: self.program_hash,
        }
    }
}

const BOOTLOADER_V1: Digest = Digest::new([
    0xf0ade65a, 0xa9d6db9f, 0xe2918d9a, 0xde2c23a8, 0x2337c5d7, 0x248a96ff, 0x3cf3111d,
    0x88124a3b,
]);

const ASSUMEVALID_V0_1: CircuitIdentity = CircuitIdentity::new(Digest::new([
    0xf3591ad7, 0x82f105fb, 0x2dc2c377, 0x9f5d66a8, 0xd3d4f889, 0xd6fca6ab, 0x0764639f,
    0x089f2f9c,
]));

const ASSUMEVALID_V0_2: CircuitIdentity = CircuitIdentity::new(Digest::new([
    0x95b4a501, 0xda250a0d, 0xe7937d9e, 0x54e9bb30, 0xd7019ed5, 0xeb0c2116, 0xb78b7dfa,
    0x81dc766f,
]));

/// Pins for protocol v1.
pub const PINS_V1: CircuitIdentityPins = CircuitIdentityPins {
    version: "v1",
    sanctioned: &[ASSUMEVALID_V0_1, ASSUMEVALID_V0_2],
    bootloader_hash: BOOTLOADER_V1,
    program_hash: ASSUMEVALID_V0_2,
};
