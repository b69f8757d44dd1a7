//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`)
//! con la ubicación del store, la ventana de validez por defecto y el filtro
//! de logging.
use once_cell::sync::Lazy;
use std::env;

use fptoken_persistence::StoreConfig;

use crate::errors::CoreError;

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ubicación del store y ventana por defecto.
    pub store: StoreConfig,
    /// Directiva de `tracing_subscriber::EnvFilter` (`RUST_LOG`, por defecto `info`).
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let store = StoreConfig::from_env();
        let log_filter = env::var("RUST_LOG").ok().filter(|v| !v.is_empty()).unwrap_or_else(|| "info".to_string());
        AppConfig { store, log_filter }
    }

    /// Rechaza una ventana por defecto que el issuer no aceptaría.
    pub fn validate(&self) -> Result<(), CoreError> {
        let days = self.store.default_days;
        if !days.is_finite() || days <= 0.0 {
            return Err(CoreError::Config(format!("FPTOKEN_DEFAULT_DAYS debe ser positivo, recibido {days}")));
        }
        Ok(())
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
