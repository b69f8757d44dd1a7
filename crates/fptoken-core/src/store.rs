use std::sync::RwLock;

use serde_json::Value;

use crate::errors::StoreError;
use crate::model::TokenRecord;

/// Almacenamiento de un único registro de token (blob plano).
///
/// `load` devuelve el registro sin tipar para que el validator pueda
/// clasificar registros malformados como inválidos en vez de fallar.
/// `save` reemplaza el registro anterior de forma atómica.
pub trait TokenStore {
    fn load(&self) -> Result<Option<Value>, StoreError>;
    fn save(&self, record: &TokenRecord) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    inner: RwLock<Option<Value>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self { Self::default() }

    /// Store precargado con un registro arbitrario (útil para probar
    /// registros malformados).
    pub fn with_raw(raw: Value) -> Self { Self { inner: RwLock::new(Some(raw)) } }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)?;
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::issue_default;
    use crate::model::Snapshot;
    use serde_json::json;

    #[test]
    fn empty_store_loads_none() {
        assert_eq!(InMemoryTokenStore::new().load().unwrap(), None);
    }

    #[test]
    fn save_replaces_previous_record() {
        let store = InMemoryTokenStore::with_raw(json!({"stale": true}));
        let rec = issue_default(&Snapshot::mapping([("a", 1)])).unwrap();
        store.save(&rec).unwrap();
        let loaded: TokenRecord = serde_json::from_value(store.load().unwrap().unwrap()).unwrap();
        assert_eq!(loaded, rec);
    }
}
