//! fptoken
//!
//! Este crate actúa como la librería de fachada del workspace:
//! - Reexporta el core (`fptoken-core`): snapshot, hashing, issuer, validator.
//! - Reexporta el store en fichero (`fptoken-persistence`).
//! - Expone `config` (entorno / .env), `errors` de aplicación y los
//!   escenarios de `demo`.

pub mod config;
pub mod demo;
pub mod errors;
pub mod hashing;

pub use fptoken_core::{demo_fingerprint, is_valid, issue, issue_default, Clock, InMemoryTokenStore, ManualClock,
                       Number, Snapshot, StoreError, SystemClock, TokenError, TokenIssuer, TokenRecord, TokenStore,
                       TokenValidator, ValidationMode, Verdict};
pub use fptoken_persistence::{JsonFileStore, StoreConfig};
