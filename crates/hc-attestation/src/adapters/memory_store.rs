//! # In-Memory Proof Store
//!
//! Proof store adapter keeping documents in process memory.

use std::collections::BTreeMap;
use parking_lot::Mutex;

use crate::domain::ProofDocument;
use crate::ports::ProofStore;

/// In-process proof store.
#[derive(Debug, Default)]
pub struct InMemoryProofStore {
    proofs: Mutex<BTreeMap<u32, ProofDocument>>,
}

impl InMemoryProofStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored proofs.
    pub fn len(&self) -> usize {
        self.proofs.lock().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProofStore for InMemoryProofStore {
    fn latest_height(&self) -> Option<u32> {
        self.proofs.lock().keys().next_back().copied()
    }

    fn load(&self, height: u32) -> Option<ProofDocument> {
        self.proofs.lock().get(&height).cloned()
    }

    fn store(&self, height: u32, proof: ProofDocument) {
        self.proofs.lock().insert(height, proof);
    }
}
