//! # Forgery Attempts
//!
//! Attempts to splice, rewind or relabel segments of a proof chain. Every
//! test here must end in a rejection.

pub mod forgery;
