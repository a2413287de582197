//! # Digest
//!
//! Fixed-width 256-bit hash value and its canonical integer encoding.
//!
//! A `Digest` stores the raw (internal) byte string of a hash as eight
//! 32-bit words in little-endian word order: word 0 carries the four
//! least-significant bytes of the integer form, and the bytes inside each
//! word are big-endian. The integer form (`U256`) is the conventional
//! big-endian display order used by block explorers.
//!
//! ```text
//! raw bytes : b0 b1 b2 b3 | b4 .. b7 | ... | b28 .. b31
//! words     : w0          | w1       | ... | w7
//! integer   : 0x b31 b30 ... b1 b0
//! ```

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Number of 32-bit words in a digest.
pub const DIGEST_WORDS: usize = 8;

/// Number of bytes in a digest.
pub const DIGEST_BYTES: usize = 32;

/// A 256-bit hash value.
///
/// Ordering follows the integer form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest {
    /// Words in little-endian word order.
    pub words: [u32; DIGEST_WORDS],
}

/// Digest parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestParseError {
    /// Wrong number of hex characters.
    #[error("Expected 64 hex characters, got {0}")]
    InvalidLength(usize),
    /// Non-hex input.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl Digest {
    /// Create a digest from its words.
    pub const fn new(words: [u32; DIGEST_WORDS]) -> Self {
        Self { words }
    }

    /// The all-zero digest.
    pub const fn zero() -> Self {
        Self {
            words: [0u32; DIGEST_WORDS],
        }
    }

    /// Check whether every word is zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Build a digest from raw internal-order bytes (e.g. SHA-256 output).
    pub fn from_bytes(bytes: [u8; DIGEST_BYTES]) -> Self {
        let mut words = [0u32; DIGEST_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { words }
    }

    /// Raw internal-order bytes.
    pub fn to_bytes(&self) -> [u8; DIGEST_BYTES] {
        let mut bytes = [0u8; DIGEST_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    /// Convert to the big-endian integer form.
    ///
    /// Each 128-bit half of the raw byte string is byte-reversed and the
    /// halves are swapped, which amounts to reading the raw bytes as a
    /// little-endian integer.
    pub fn to_u256(&self) -> U256 {
        let bytes = self.to_bytes();
        let (lo, hi) = bytes.split_at(DIGEST_BYTES / 2);

        let mut be = [0u8; DIGEST_BYTES];
        be[..16].copy_from_slice(hi);
        be[16..].copy_from_slice(lo);
        be[..16].reverse();
        be[16..].reverse();

        U256::from_big_endian(&be)
    }

    /// Inverse of [`Digest::to_u256`].
    pub fn from_u256(value: U256) -> Self {
        let mut be = [0u8; DIGEST_BYTES];
        value.to_big_endian(&mut be);
        let (hi, lo) = be.split_at(DIGEST_BYTES / 2);

        let mut bytes = [0u8; DIGEST_BYTES];
        bytes[..16].copy_from_slice(lo);
        bytes[16..].copy_from_slice(hi);
        bytes[..16].reverse();
        bytes[16..].reverse();

        Self::from_bytes(bytes)
    }

    /// Parse a big-endian display hex string (optional `0x` prefix).
    pub fn from_hex(hex_str: &str) -> Result<Self, DigestParseError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        if hex_str.len() != DIGEST_BYTES * 2 {
            return Err(DigestParseError::InvalidLength(hex_str.len()));
        }

        let decoded =
            hex::decode(hex_str).map_err(|e| DigestParseError::InvalidHex(e.to_string()))?;
        let mut be = [0u8; DIGEST_BYTES];
        be.copy_from_slice(&decoded);
        Ok(Self::from_u256(U256::from_big_endian(&be)))
    }

    /// Big-endian display hex without prefix.
    pub fn to_hex(&self) -> String {
        let mut be = [0u8; DIGEST_BYTES];
        self.to_u256().to_big_endian(&mut be);
        hex::encode(be)
    }
}

impl From<U256> for Digest {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

impl From<Digest> for U256 {
    fn from(digest: Digest) -> Self {
        digest.to_u256()
    }
}

impl PartialOrd for Digest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Digest {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_u256().cmp(&other.to_u256())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
