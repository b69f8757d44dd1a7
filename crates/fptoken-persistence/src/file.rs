//! Store en fichero JSON.
//!
//! El registro se escribe con indentación de 2 espacios en un fichero
//! temporal del mismo directorio y después se renombra sobre el destino, de
//! forma que un lector nunca observa un registro a medio escribir. Un fichero
//! ilegible se trata como ausente (se registra un warning).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fptoken_core::{StoreError, TokenRecord, TokenStore};
use log::{debug, error, warn};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn from_config(config: &StoreConfig) -> Self { Self::new(config.path.clone()) }

    pub fn path(&self) -> &Path { &self.path }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_raw(&self) -> Result<Option<Value>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("token store {} unreadable, treating as empty: {e}", self.path.display());
                Ok(None)
            }
        }
    }

    fn write_record(&self, record: &TokenRecord) -> Result<(), PersistenceError> {
        let body = serde_json::to_string_pretty(record)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, body)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!("token {} saved to {}", record.uuid(), self.path.display());
        Ok(())
    }
}

impl TokenStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.read_raw()?)
    }

    fn save(&self, record: &TokenRecord) -> Result<(), StoreError> {
        self.write_record(record).map_err(|e| {
                                     error!("failed to save token to {}: {e}", self.path.display());
                                     StoreError::from(e)
                                 })
    }
}
