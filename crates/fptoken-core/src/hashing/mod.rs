//! Módulo de hashing y canonicalización de fingerprints.

pub mod canonical_json;
pub mod hash;

pub use canonical_json::{to_canonical_bytes, to_canonical_json};
pub use hash::{fingerprint_hash, hash_bytes, hash_str};
