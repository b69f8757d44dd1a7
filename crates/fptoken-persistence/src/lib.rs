//! fptoken-persistence
//!
//! Colaborador de persistencia para el core: implementa `TokenStore` sobre un
//! fichero JSON local.
//!
//! Módulos:
//! - `file`: `JsonFileStore` (escritura atómica write-then-rename).
//! - `config`: carga de configuración desde .env / entorno.
//! - `error`: errores de IO / serialización mapeados a `StoreError`.

pub mod config;
pub mod error;
pub mod file;

pub use config::{init_dotenv, StoreConfig, DEFAULT_STORE_PATH};
pub use error::PersistenceError;
pub use file::JsonFileStore;
