//! Carga de configuración del store desde variables de entorno.
//! Usa `FPTOKEN_STORE_PATH` y `FPTOKEN_DEFAULT_DAYS` (opcionales).

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use fptoken_core::constants::DEFAULT_VALIDITY_DAYS;
use once_cell::sync::Lazy;

pub const DEFAULT_STORE_PATH: &str = "uuid_store.json";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub default_days: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_STORE_PATH),
               default_days: DEFAULT_VALIDITY_DAYS }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let path = lookup("FPTOKEN_STORE_PATH").filter(|v| !v.trim().is_empty())
                                               .map(PathBuf::from)
                                               .unwrap_or(defaults.path);
        let default_days = lookup("FPTOKEN_DEFAULT_DAYS").and_then(|v| v.trim().parse().ok())
                                                         .unwrap_or(defaults.default_days);
        Self { path, default_days }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(StoreConfig::from_lookup(lookup(&[])), StoreConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = StoreConfig::from_lookup(lookup(&[("FPTOKEN_STORE_PATH", "/tmp/t.json"), ("FPTOKEN_DEFAULT_DAYS", "30")]));
        assert_eq!(cfg.path, PathBuf::from("/tmp/t.json"));
        assert_eq!(cfg.default_days, 30.0);
    }

    #[test]
    fn ignores_unparsable_days_and_blank_path() {
        let cfg = StoreConfig::from_lookup(lookup(&[("FPTOKEN_STORE_PATH", "  "), ("FPTOKEN_DEFAULT_DAYS", "soon")]));
        assert_eq!(cfg, StoreConfig::default());
    }
}
