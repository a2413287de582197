//! # Attestations
//!
//! Statements about chain-state transitions, the aggregator's input records,
//! and their fixed-width word layout.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::digest::{Digest, DIGEST_WORDS};
use super::errors::AttestationError;

/// Words in a serialized [`Attestation`].
pub const ATTESTATION_WORDS: usize = 2 + 3 * DIGEST_WORDS;

/// Words in a serialized [`TaskResult`].
pub const TASK_RESULT_WORDS: usize = 2 * DIGEST_WORDS + 2 + 2 * DIGEST_WORDS;

/// Identifier of a validation program version (its program hash).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitIdentity(pub Digest);

impl CircuitIdentity {
    /// Identity carried by attestations bootstrapped from genesis.
    pub const GENESIS_SENTINEL: CircuitIdentity = CircuitIdentity(Digest::zero());

    /// Wrap a program hash.
    pub const fn new(digest: Digest) -> Self {
        Self(digest)
    }

    /// Check for the genesis sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for CircuitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// "State `prev_state_hash` at `prev_height` transitions to state
/// `new_state_hash` at `new_height`, continuing a chain produced under
/// `carried_circuit_identity`."
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// Height of the initial state.
    pub prev_height: u32,
    /// Height of the final state.
    pub new_height: u32,
    /// Hash of the initial state.
    pub prev_state_hash: Digest,
    /// Hash of the final state.
    pub new_state_hash: Digest,
    /// Identity of the circuit that produced the prior proof, or the
    /// genesis sentinel.
    pub carried_circuit_identity: CircuitIdentity,
}

impl Attestation {
    /// Serialize in protocol word order.
    pub fn to_words(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(ATTESTATION_WORDS);
        words.push(self.prev_height);
        words.push(self.new_height);
        words.extend_from_slice(&self.prev_state_hash.words);
        words.extend_from_slice(&self.new_state_hash.words);
        words.extend_from_slice(&self.carried_circuit_identity.0.words);
        words
    }

    /// Parse from protocol word order; the length must be exact.
    pub fn from_words(words: &[u32]) -> Result<Self, AttestationError> {
        if words.len() != ATTESTATION_WORDS {
            return Err(AttestationError::Structural(format!(
                "attestation must be {} words, got {}",
                ATTESTATION_WORDS,
                words.len()
            )));
        }
        let mut reader = WordReader::new(words);
        Ok(Self {
            prev_height: reader.word(),
            new_height: reader.word(),
            prev_state_hash: reader.digest(),
            new_state_hash: reader.digest(),
            carried_circuit_identity: CircuitIdentity(reader.digest()),
        })
    }

    /// Serialize as little-endian bytes, 4 per word.
    pub fn to_bytes(&self) -> Vec<u8> {
        words_to_bytes(&self.to_words())
    }

    /// Inverse of [`Attestation::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AttestationError> {
        Self::from_words(&bytes_to_words(bytes)?)
    }

    /// Number of blocks covered.
    pub fn block_count(&self) -> u32 {
        self.new_height.saturating_sub(self.prev_height)
    }
}

/// Declared circuit-identity fields of a verified task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskIdentity {
    /// Hash of the bootloader that ran the task.
    pub bootloader_hash: Digest,
    /// Hash of the task program.
    pub program_hash: CircuitIdentity,
}

/// One already-verified segment, as handed to the aggregator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Identity fields declared by the task.
    pub identity: TaskIdentity,
    /// Height of the segment's initial state.
    pub prev_height: u32,
    /// Height of the segment's final state.
    pub new_height: u32,
    /// Hash of the segment's initial state.
    pub prev_state_hash: Digest,
    /// Hash of the segment's final state.
    pub new_state_hash: Digest,
}

impl TaskResult {
    /// Task record for an attestation verified under `identity`.
    pub fn from_attestation(identity: TaskIdentity, attestation: &Attestation) -> Self {
        Self {
            identity,
            prev_height: attestation.prev_height,
            new_height: attestation.new_height,
            prev_state_hash: attestation.prev_state_hash,
            new_state_hash: attestation.new_state_hash,
        }
    }

    /// Serialize: identity fields, then the range.
    pub fn to_words(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(TASK_RESULT_WORDS);
        words.extend_from_slice(&self.identity.bootloader_hash.words);
        words.extend_from_slice(&self.identity.program_hash.0.words);
        words.push(self.prev_height);
        words.push(self.new_height);
        words.extend_from_slice(&self.prev_state_hash.words);
        words.extend_from_slice(&self.new_state_hash.words);
        words
    }

    /// Parse from [`TaskResult::to_words`] layout.
    pub fn from_words(words: &[u32]) -> Result<Self, AttestationError> {
        if words.len() != TASK_RESULT_WORDS {
            return Err(AttestationError::Structural(format!(
                "task result must be {} words, got {}",
                TASK_RESULT_WORDS,
                words.len()
            )));
        }
        let mut reader = WordReader::new(words);
        Ok(Self {
            identity: TaskIdentity {
                bootloader_hash: reader.digest(),
                program_hash: CircuitIdentity(reader.digest()),
            },
            prev_height: reader.word(),
            new_height: reader.word(),
            prev_state_hash: reader.digest(),
            new_state_hash: reader.digest(),
        })
    }
}

/// A contiguous run of segments collapsed into one range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRange {
    /// Height of the first segment's initial state.
    pub prev_height: u32,
    /// Height of the last segment's final state.
    pub new_height: u32,
    /// Hash of the first segment's initial state.
    pub prev_state_hash: Digest,
    /// Hash of the last segment's final state.
    pub new_state_hash: Digest,
}

/// Opaque proof bytes, as produced by the prover.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProofDocument(pub Vec<u8>);

impl ProofDocument {
    /// Wrap proof bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Proof bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ProofDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProofDocument({} bytes)", self.0.len())
    }
}

impl Serialize for ProofDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for ProofDocument {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s).map(Self).map_err(serde::de::Error::custom)
    }
}

/// Where a new segment starts from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorProof {
    /// Bootstrap from the genesis constant.
    Genesis,
    /// Continue from a previously proven segment.
    Continuation(ProofDocument),
}

/// Public outputs extracted by the proof verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedProof {
    /// Identity of the program the proof was produced by.
    pub circuit_identity: CircuitIdentity,
    /// The attestation the proof commits to.
    pub public_output: Attestation,
}

struct WordReader<'a> {
    words: &'a [u32],
    pos: usize,
}

impl<'a> WordReader<'a> {
    fn new(words: &'a [u32]) -> Self {
        Self { words, pos: 0 }
    }

    // Callers check the total length up front.
    fn word(&mut self) -> u32 {
        let word = self.words[self.pos];
        self.pos += 1;
        word
    }

    fn digest(&mut self) -> Digest {
        let mut words = [0u32; DIGEST_WORDS];
        words.copy_from_slice(&self.words[self.pos..self.pos + DIGEST_WORDS]);
        self.pos += DIGEST_WORDS;
        Digest::new(words)
    }
}

/// Little-endian byte encoding, 4 bytes per word.
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Inverse of [`words_to_bytes`]; the length must be a multiple of 4.
pub fn bytes_to_words(bytes: &[u8]) -> Result<Vec<u32>, AttestationError> {
    if bytes.len() % 4 != 0 {
        return Err(AttestationError::Structural(format!(
            "byte length {} is not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
