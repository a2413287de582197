//! # HC Attestation Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Real mainnet headers, mock chains
//! ├── exploits/         # Forgery attempts against the proof chain
//! └── integration/      # End-to-end chaining and aggregation flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hc-tests
//!
//! # By category
//! cargo test -p hc-tests integration::
//! cargo test -p hc-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p hc-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod exploits;
pub mod fixtures;
pub mod integration;
