//! # Integration Tests
//!
//! Cross-module flows: segment chaining feeding aggregation, with both
//! mock collaborators and real mainnet headers.

pub mod flows;
