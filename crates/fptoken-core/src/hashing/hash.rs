//! Hash helpers – SHA-256 en hex minúscula.

use sha2::{Digest, Sha256};

use super::canonical_json::to_canonical_bytes;
use crate::model::Snapshot;

/// Hashea bytes y devuelve hex (64 caracteres).
pub fn hash_bytes(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    hash_bytes(input.as_bytes())
}

/// Identidad del fingerprint: SHA-256 de su codificación canónica.
pub fn fingerprint_hash(snapshot: &Snapshot) -> String {
    hash_bytes(&to_canonical_bytes(snapshot))
}
