//! # Shared Fixtures
//!
//! Mainnet headers 1..=3 and helpers for building test services.

use hc_attestation::{
    AttestationConfig, AttestationService, BitcoinHeaderValidator, BlockHeader, ChainState,
    Digest, MockBlock, MockHeaderValidator, MockProofVerifier, NetworkParams,
};

fn digest(hex: &str) -> Digest {
    match Digest::from_hex(hex) {
        Ok(digest) => digest,
        Err(e) => panic!("bad fixture digest {}: {}", hex, e),
    }
}

/// Mainnet block 1.
pub fn block1() -> BlockHeader {
    BlockHeader {
        version: 1,
        prev_block_hash: digest("000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"),
        merkle_root: digest("0e3e2357e806b6cdb1f70b54c3a3a17b6714ee1f0e68bebb44a74b1efd512098"),
        time: 1_231_469_665,
        bits: 0x1d00ffff,
        nonce: 2_573_394_689,
    }
}

/// Mainnet block 2.
pub fn block2() -> BlockHeader {
    BlockHeader {
        version: 1,
        prev_block_hash: digest("00000000839a8e6886ab5951d76f411475428afc90947ee320161bbf18eb6048"),
        merkle_root: digest("9b0fc92260312ce44e74ef369f5c66bbb85848f2eddd5a7a1cde251e54ccfdd5"),
        time: 1_231_469_744,
        bits: 0x1d00ffff,
        nonce: 1_639_830_024,
    }
}

/// Mainnet block 3.
pub fn block3() -> BlockHeader {
    BlockHeader {
        version: 1,
        prev_block_hash: digest("000000006a625f06636b8bb6ac7b960a8d03705d1ace08b1a19da3fdcc99ddbd"),
        merkle_root: digest("999e1c837c76a1b7fbb7e57baf87b309960f5ffefbf2a9b95dd890602272f644"),
        time: 1_231_470_173,
        bits: 0x1d00ffff,
        nonce: 1_844_305_925,
    }
}

/// Mainnet blocks 1..=3 in order.
pub fn mainnet_headers() -> Vec<BlockHeader> {
    vec![block1(), block2(), block3()]
}

/// Hash of mainnet block 3.
pub fn block3_hash() -> Digest {
    digest("0000000082b5015589a3fdf2d4baff403e6f0be035a5d9742c1cae6295464449")
}

/// `count` mock blocks extending genesis.
pub fn mock_chain(count: usize) -> Vec<MockBlock> {
    let genesis = ChainState::genesis();
    MockBlock::chain(genesis.best_block_hash, genesis.epoch_start_time, count)
}

/// Service over mock collaborators.
pub fn mock_service() -> AttestationService<MockHeaderValidator, MockProofVerifier> {
    AttestationService::new(
        AttestationConfig::for_testing(),
        MockHeaderValidator::default(),
        MockProofVerifier::default(),
    )
}

/// Service validating mainnet headers, verifying mock proofs.
pub fn mainnet_service() -> AttestationService<BitcoinHeaderValidator, MockProofVerifier> {
    AttestationService::new(
        AttestationConfig::default(),
        BitcoinHeaderValidator::new(NetworkParams::mainnet()),
        MockProofVerifier::default(),
    )
}
