//! Constantes del núcleo de tokens.
//!
//! Agrupa valores estáticos que participan en la construcción de los
//! registros y en la compatibilidad de su esquema serializado. Cambiar
//! `TOKEN_VERSION` implica que los registros persistidos por versiones
//! anteriores dejan de ser equivalentes a los nuevos.

/// Versión del esquema del `TokenRecord`.
pub const TOKEN_VERSION: u32 = 1;

/// Milisegundos en un día.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Ventana de validez por defecto (días).
pub const DEFAULT_VALIDITY_DAYS: f64 = 7.0;

/// Profundidad máxima aceptada al convertir un snapshot externo.
pub const MAX_SNAPSHOT_DEPTH: usize = 128;
