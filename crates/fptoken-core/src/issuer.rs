//! Emisión de tokens.
//!
//! Un token combina un UUID v4 (CSPRNG del sistema operativo vía `uuid`), el
//! instante de emisión, la ventana de validez y el hash del fingerprint. El
//! issuer no persiste nada: guardar el registro es responsabilidad de un
//! `TokenStore`.
use log::debug;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::constants::{DAY_MS, DEFAULT_VALIDITY_DAYS, TOKEN_VERSION};
use crate::errors::TokenError;
use crate::hashing::fingerprint_hash;
use crate::model::{Snapshot, TokenRecord};

#[derive(Debug, Clone, Default)]
pub struct TokenIssuer<C: Clock = SystemClock> {
    clock: C,
}

impl TokenIssuer<SystemClock> {
    pub fn new() -> Self { Self { clock: SystemClock } }
}

impl<C: Clock> TokenIssuer<C> {
    pub fn with_clock(clock: C) -> Self { Self { clock } }

    /// Emite un token válido durante `days` días (admite fracciones).
    ///
    /// # Errores
    /// `TokenError::InvalidValidity` si `days` no es un número finito
    /// positivo o si la expiración no cabe en milisegundos `i64`.
    /// `TokenError::MalformedInput` si el snapshot supera
    /// `MAX_SNAPSHOT_DEPTH` niveles de anidamiento.
    pub fn issue(&self, snapshot: &Snapshot, days: f64) -> Result<TokenRecord, TokenError> {
        let window = validity_window_ms(days)?;
        snapshot.ensure_depth()?;
        let fingerprint_hash = fingerprint_hash(snapshot);
        let issued_at = self.clock.now_millis();
        let expires_at = issued_at.checked_add(window).ok_or(TokenError::InvalidValidity(days))?;
        let uuid = Uuid::new_v4();
        debug!("issued token {uuid} expires_at={expires_at} fingerprint={fingerprint_hash}");
        Ok(TokenRecord::new(uuid, issued_at, expires_at, fingerprint_hash, days, TOKEN_VERSION))
    }

    pub fn issue_default(&self, snapshot: &Snapshot) -> Result<TokenRecord, TokenError> {
        self.issue(snapshot, DEFAULT_VALIDITY_DAYS)
    }
}

/// Longitud de la ventana en milisegundos (redondeada al ms más cercano).
pub fn validity_window_ms(days: f64) -> Result<i64, TokenError> {
    if !days.is_finite() || days <= 0.0 {
        return Err(TokenError::InvalidValidity(days));
    }
    let ms = (days * DAY_MS as f64).round();
    if ms >= i64::MAX as f64 {
        return Err(TokenError::InvalidValidity(days));
    }
    Ok(ms as i64)
}

/// Emite con el reloj del sistema.
pub fn issue(snapshot: &Snapshot, days: f64) -> Result<TokenRecord, TokenError> {
    TokenIssuer::new().issue(snapshot, days)
}

/// Emite con la ventana por defecto (7 días).
pub fn issue_default(snapshot: &Snapshot) -> Result<TokenRecord, TokenError> {
    issue(snapshot, DEFAULT_VALIDITY_DAYS)
}
