//!
//! Utility helpers shared across the diamond crates: deterministic CBOR
//! codecs, SHA-256 hashing and hex/text formatting. Each submodule provides a
//! focused toolkit used by the storage and execution layers.
//!

pub mod format;
pub mod hash;
pub mod serialize;
