pub mod demo;
pub mod snapshot;
pub mod token;

pub use demo::demo_fingerprint;
pub use snapshot::{Number, Snapshot};
pub use token::TokenRecord;
