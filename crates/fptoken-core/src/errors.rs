//! Errores específicos del core.
//!
//! La validación nunca produce errores: colapsa en un `Verdict`. Sólo la
//! emisión (ventana inválida), la conversión de snapshots externos y el
//! almacenamiento devuelven `Err`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum TokenError {
    #[error("invalid validity window: {0} days (must be a positive finite number)")]
    InvalidValidity(f64),
    #[error("malformed snapshot: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errores devueltos por implementaciones de `TokenStore`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(String),
    #[error("store serialization: {0}")]
    Serialization(String),
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
