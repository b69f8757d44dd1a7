//! fptoken-core: emisión y validación de tokens ligados a un fingerprint.
//!
//! Flujo: `Snapshot` → canonical JSON → SHA-256 → hash; hash + UUID v4 +
//! timestamps → `TokenRecord`; registro (+ snapshot actual opcional) →
//! `Verdict`.
pub mod clock;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod issuer;
pub mod model;
pub mod store;
pub mod validator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{StoreError, TokenError};
pub use hashing::{fingerprint_hash, to_canonical_json};
pub use issuer::{issue, issue_default, TokenIssuer};
pub use model::{demo_fingerprint, Number, Snapshot, TokenRecord};
pub use store::{InMemoryTokenStore, TokenStore};
pub use validator::{is_valid, TokenValidator, ValidationMode, Verdict};
