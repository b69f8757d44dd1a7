use std::process::ExitCode;

use chrono::{DateTime, Utc};
use fptoken::config::CONFIG;
use fptoken::demo::run_scenarios;
use fptoken::errors::CoreError;
use fptoken::{demo_fingerprint, InMemoryTokenStore, JsonFileStore, TokenIssuer, TokenStore, TokenValidator,
              ValidationMode};
use log::{error, info};
use tracing_subscriber::EnvFilter;

fn fmt_ms(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|d| d.to_rfc3339()).unwrap_or_else(|| ms.to_string())
}

/// Escenarios A–D con reloj manual.
fn run_scenario_report() -> Result<bool, CoreError> {
    let outcomes = run_scenarios(Utc::now().timestamp_millis())?;
    let mut all_ok = true;
    for o in &outcomes {
        println!("[{}] {:<45} expected={:<22} actual={:<22} {}",
                 o.name,
                 o.description,
                 o.expected.to_string(),
                 o.actual.to_string(),
                 if o.passed() { "ok" } else { "MISMATCH" });
        println!("    issued={} expires={}", fmt_ms(o.token.issued_at()), fmt_ms(o.token.expires_at()));
        all_ok &= o.passed();
    }
    Ok(all_ok)
}

/// Emisión real contra el fingerprint de demostración y el store configurado.
fn run_store_roundtrip(persist: bool) -> Result<(), CoreError> {
    CONFIG.validate()?;
    let store: Box<dyn TokenStore> = if persist {
        Box::new(JsonFileStore::from_config(&CONFIG.store))
    } else {
        Box::new(InMemoryTokenStore::new())
    };
    let fingerprint = demo_fingerprint();
    let token = TokenIssuer::new().issue(&fingerprint, CONFIG.store.default_days)?;
    store.save(&token)?;
    let raw = store.load()?
                   .ok_or_else(|| CoreError::Internal("token recién guardado no encontrado".into()))?;
    let validator = TokenValidator::new();
    let strict = validator.check_raw(&raw, ValidationMode::Strict(&fingerprint));
    let loose = validator.check_raw(&raw, ValidationMode::Loose);
    info!("token {} strict={strict} loose={loose}", token.uuid());
    println!("[store] token={} expires={} strict={} loose={}",
             token.uuid(),
             fmt_ms(token.expires_at()),
             strict,
             loose);
    Ok(())
}

fn main() -> ExitCode {
    // Cargar variables de entorno desde .env si existe
    fptoken_persistence::init_dotenv();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&CONFIG.log_filter)).init();

    let persist = std::env::args().any(|a| a == "--persist");
    let result = run_scenario_report().and_then(|ok| run_store_roundtrip(persist).map(|_| ok));
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("al menos un escenario no produjo el veredicto esperado");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("[fptoken-demo] {e}");
            ExitCode::from(2)
        }
    }
}
