// Reexport de la implementación única ubicada en `fptoken-core` para evitar
// duplicación de lógica de canonicalización/hashing a nivel de workspace.
pub use fptoken_core::hashing::canonical_json;
pub use fptoken_core::hashing::{fingerprint_hash, to_canonical_bytes, to_canonical_json};
