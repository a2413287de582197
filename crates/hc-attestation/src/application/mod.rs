//! # Application Layer
//!
//! Service orchestration.

pub mod service;

pub use service::{resume_point, AttestationService};
