//! Registro de token emitido.
//!
//! Un `TokenRecord` es inmutable: sólo el issuer lo construye y el resto del
//! sistema lo lee a través de accessors. La forma serializada (camelCase) es
//! el contrato con los colaboradores externos (store, transporte):
//!
//! ```json
//! { "uuid": "...", "issuedAt": 0, "expiresAt": 0,
//!   "fingerprintHash": "<64 hex>", "daysValid": 7, "version": 1 }
//! ```
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    uuid: Uuid,
    issued_at: i64,
    expires_at: i64,
    fingerprint_hash: String,
    #[serde(serialize_with = "serialize_days")]
    days_valid: f64,
    version: u32,
}

impl TokenRecord {
    pub(crate) fn new(uuid: Uuid, issued_at: i64, expires_at: i64, fingerprint_hash: String, days_valid: f64, version: u32) -> Self {
        Self { uuid,
               issued_at,
               expires_at,
               fingerprint_hash,
               days_valid,
               version }
    }

    pub fn uuid(&self) -> Uuid { self.uuid }
    /// Milisegundos desde epoch.
    pub fn issued_at(&self) -> i64 { self.issued_at }
    /// Milisegundos desde epoch; el token deja de ser válido en este instante.
    pub fn expires_at(&self) -> i64 { self.expires_at }
    pub fn fingerprint_hash(&self) -> &str { &self.fingerprint_hash }
    pub fn days_valid(&self) -> f64 { self.days_valid }
    pub fn version(&self) -> u32 { self.version }

    /// `true` a partir del instante de expiración (inclusive).
    pub fn is_expired_at(&self, now_ms: i64) -> bool { now_ms >= self.expires_at }
}

// Días enteros se escriben como entero (`7`, no `7.0`).
fn serialize_days<S: Serializer>(days: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if days.fract() == 0.0 && days.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*days as i64)
    } else {
        serializer.serialize_f64(*days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(days: f64) -> TokenRecord {
        TokenRecord::new(Uuid::nil(), 1_000, 1_000 + 86_400_000, "ab".repeat(32), days, 1)
    }

    #[test]
    fn serializes_camel_case_fields() {
        let v = serde_json::to_value(sample(7.0)).unwrap();
        assert_eq!(v,
                   json!({
                       "uuid": "00000000-0000-0000-0000-000000000000",
                       "issuedAt": 1_000,
                       "expiresAt": 86_401_000,
                       "fingerprintHash": "ab".repeat(32),
                       "daysValid": 7,
                       "version": 1
                   }));
    }

    #[test]
    fn fractional_days_stay_fractional() {
        let v = serde_json::to_value(sample(0.5)).unwrap();
        assert_eq!(v["daysValid"], json!(0.5));
    }

    #[test]
    fn reads_back_record_written_by_other_tools() {
        let raw = json!({
            "uuid": "9b2f6c1e-4a7d-4f3e-8b1a-2c3d4e5f6a7b",
            "issuedAt": 1_700_000_000_000_i64,
            "expiresAt": 1_700_604_800_000_i64,
            "fingerprintHash": "0".repeat(64),
            "daysValid": 7,
            "version": 1
        });
        let rec: TokenRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(rec.days_valid(), 7.0);
        assert_eq!(rec.expires_at() - rec.issued_at(), 7 * 86_400_000);
        assert_eq!(rec.uuid().get_version_num(), 4);
    }

    #[test]
    fn expiry_is_inclusive() {
        let rec = sample(1.0);
        assert!(!rec.is_expired_at(rec.expires_at() - 1));
        assert!(rec.is_expired_at(rec.expires_at()));
    }
}
