//! Reference hashing for the project graph.
//!
//! Provides domain-separated BLAKE3 hashing that turns an object's kind
//! (`isa`), a caller-supplied context string, and an attempt counter into a
//! fixed-width hex [`pbx_types::Reference`]. The hashing is pure: the
//! uniqueness retry loop lives with the store that knows which references
//! are taken.

pub mod hasher;

pub use hasher::{
    ReferenceHasher, DEFAULT_REFERENCE_BYTES, MAX_REFERENCE_BYTES, MIN_REFERENCE_BYTES,
};
