//! Escenarios de demostración.
//!
//! Cada escenario emite un token con un reloj manual, opcionalmente avanza el
//! tiempo y valida; el resultado se compara con el veredicto esperado. El
//! binario `fptoken-demo` los imprime y los tests de integración los
//! verifican.
use fptoken_core::constants::DAY_MS;
use fptoken_core::{ManualClock, Snapshot, TokenError, TokenIssuer, TokenRecord, TokenValidator, ValidationMode,
                   Verdict};
use serde_json::json;

#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub description: &'static str,
    pub token: TokenRecord,
    pub expected: Verdict,
    pub actual: Verdict,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool { self.expected == self.actual }
}

struct Scenario {
    name: &'static str,
    description: &'static str,
    issued_with: serde_json::Value,
    days: f64,
    /// Milisegundos transcurridos entre emisión y validación.
    elapsed_ms: i64,
    /// `None` valida en modo laxo.
    validated_with: Option<serde_json::Value>,
    expected: Verdict,
}

fn scenarios() -> Vec<Scenario> {
    vec![Scenario { name: "A",
                    description: "same snapshot, same second",
                    issued_with: json!({"a": 1, "b": 2}),
                    days: 7.0,
                    elapsed_ms: 0,
                    validated_with: Some(json!({"a": 1, "b": 2})),
                    expected: Verdict::Valid },
         Scenario { name: "B",
                    description: "same snapshot, keys reordered",
                    issued_with: json!({"a": 1, "b": 2}),
                    days: 7.0,
                    elapsed_ms: 1_000,
                    validated_with: Some(json!({"b": 2, "a": 1})),
                    expected: Verdict::Valid },
         Scenario { name: "C",
                    description: "numeric 1 vs textual \"1\"",
                    issued_with: json!({"a": 1}),
                    days: 7.0,
                    elapsed_ms: 0,
                    validated_with: Some(json!({"a": "1"})),
                    expected: Verdict::FingerprintMismatch },
         Scenario { name: "D",
                    description: "1 ms window, validated loosely past expiry",
                    issued_with: json!({"a": 1}),
                    days: 1.0 / DAY_MS as f64,
                    elapsed_ms: 2,
                    validated_with: None,
                    expected: Verdict::Expired },]
}

/// Ejecuta los escenarios A–D con un reloj fijado en `start_ms`.
pub fn run_scenarios(start_ms: i64) -> Result<Vec<ScenarioOutcome>, TokenError> {
    let clock = ManualClock::new(start_ms);
    let issuer = TokenIssuer::with_clock(&clock);
    let validator = TokenValidator::with_clock(&clock);
    let mut outcomes = Vec::new();
    for sc in scenarios() {
        clock.set(start_ms);
        let token = issuer.issue(&Snapshot::try_from(sc.issued_with)?, sc.days)?;
        clock.advance(sc.elapsed_ms);
        let current = sc.validated_with.map(Snapshot::try_from).transpose()?;
        let actual = validator.check(&token, ValidationMode::from(current.as_ref()));
        outcomes.push(ScenarioOutcome { name: sc.name,
                                        description: sc.description,
                                        token,
                                        expected: sc.expected,
                                        actual });
    }
    Ok(outcomes)
}
