//! Proof module: canonical JSON serialization and canonical hashing.
//!
//! Used by the search layer to fingerprint traces and reports so that
//! repeated runs can be compared byte-for-byte.

pub mod canon;
pub mod hash;
