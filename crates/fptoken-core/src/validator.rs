//! Validación de tokens.
//!
//! Procedimiento (se corta en el primer fallo):
//! 1. el registro debe estar bien formado (`expiresAt` numérico);
//! 2. `now >= expiresAt` invalida el token;
//! 3. en modo estricto el hash del fingerprint actual debe coincidir
//!    exactamente con el almacenado;
//! 4. en otro caso el token es válido.
//!
//! La validación nunca devuelve `Err`: el resultado es un `Verdict`. El modo
//! laxo (`ValidationMode::Loose`) sólo comprueba la expiración y ofrece una
//! garantía más débil; es el llamador quien lo elige de forma explícita.
use std::fmt;

use log::debug;
use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::hashing::fingerprint_hash;
use crate::model::{Snapshot, TokenRecord};

#[derive(Debug, Clone, Copy)]
pub enum ValidationMode<'a> {
    /// Expiración + igualdad del hash de fingerprint.
    Strict(&'a Snapshot),
    /// Sólo expiración.
    Loose,
}

impl<'a> From<Option<&'a Snapshot>> for ValidationMode<'a> {
    fn from(current: Option<&'a Snapshot>) -> Self {
        current.map_or(ValidationMode::Loose, ValidationMode::Strict)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Malformed,
    Expired,
    FingerprintMismatch,
}

impl Verdict {
    pub fn is_valid(self) -> bool { matches!(self, Verdict::Valid) }

    pub fn reason(self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::Malformed => "malformed record",
            Verdict::Expired => "expired",
            Verdict::FingerprintMismatch => "fingerprint mismatch",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.reason()) }
}

#[derive(Debug, Clone, Default)]
pub struct TokenValidator<C: Clock = SystemClock> {
    clock: C,
}

impl TokenValidator<SystemClock> {
    pub fn new() -> Self { Self { clock: SystemClock } }
}

impl<C: Clock> TokenValidator<C> {
    pub fn with_clock(clock: C) -> Self { Self { clock } }

    pub fn check(&self, token: &TokenRecord, mode: ValidationMode<'_>) -> Verdict {
        let expired = token.is_expired_at(self.clock.now_millis());
        let verdict = decide(expired, Some(token.fingerprint_hash()), mode);
        debug!("token {} verdict={verdict}", token.uuid());
        verdict
    }

    /// Valida un registro sin tipar (p.ej. leído de un store). Un registro
    /// que no es objeto o sin `expiresAt` numérico es `Malformed`.
    pub fn check_raw(&self, raw: &Value, mode: ValidationMode<'_>) -> Verdict {
        let Some(obj) = raw.as_object() else {
            return Verdict::Malformed;
        };
        let Some(expires_at) = obj.get("expiresAt").and_then(Value::as_f64) else {
            return Verdict::Malformed;
        };
        let expired = self.clock.now_millis() as f64 >= expires_at;
        let stored_hash = obj.get("fingerprintHash").and_then(Value::as_str);
        let verdict = decide(expired, stored_hash, mode);
        debug!("raw token {} verdict={verdict}", obj.get("uuid").and_then(Value::as_str).unwrap_or("<no uuid>"));
        verdict
    }

    pub fn is_valid(&self, token: &TokenRecord, current: Option<&Snapshot>) -> bool {
        self.check(token, current.into()).is_valid()
    }
}

fn decide(expired: bool, stored_hash: Option<&str>, mode: ValidationMode<'_>) -> Verdict {
    if expired {
        return Verdict::Expired;
    }
    if let ValidationMode::Strict(current) = mode {
        if stored_hash != Some(fingerprint_hash(current).as_str()) {
            return Verdict::FingerprintMismatch;
        }
    }
    Verdict::Valid
}

/// Validación con el reloj del sistema. `None` selecciona el modo laxo.
pub fn is_valid(token: &TokenRecord, current: Option<&Snapshot>) -> bool {
    TokenValidator::new().is_valid(token, current)
}
