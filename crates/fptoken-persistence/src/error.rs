//! Errores de persistencia.
//! Mapea errores de IO / serde a variantes semánticas del dominio de persistencia.

use std::io::{Error as IoError, ErrorKind};

use fptoken_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("transient IO error: {0}")]
    TransientIo(String),
    #[error("unknown IO error: {0}")]
    Unknown(String),
}

impl From<IoError> for PersistenceError {
    fn from(err: IoError) -> Self {
        match err.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut => Self::TransientIo(err.to_string()),
            other => Self::Unknown(format!("io error kind {other:?}: {err}")),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self { Self::Serialization(err.to_string()) }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Serialization(msg) => StoreError::Serialization(msg),
            other => StoreError::Io(other.to_string()),
        }
    }
}
