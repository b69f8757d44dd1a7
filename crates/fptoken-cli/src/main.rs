//! CLI mínima sobre el core:
//!
//! ```text
//! fptoken new [--days N] [--fingerprint FILE]
//! fptoken validate [--loose] [--fingerprint FILE] [--exit-code]
//! fptoken show
//! ```
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use fptoken_core::{demo_fingerprint, Snapshot, StoreError, TokenError, TokenIssuer, TokenStore, TokenValidator,
                   ValidationMode};
use fptoken_persistence::{JsonFileStore, StoreConfig};
use log::info;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fptoken", about = "Issue and validate fingerprint-bound tokens")]
struct Cli {
    /// Token store file (defaults to FPTOKEN_STORE_PATH or ./uuid_store.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create (or overwrite) the stored token
    New {
        /// Validity window in days
        #[arg(long)]
        days: Option<f64>,
        /// JSON file with the fingerprint snapshot (demo fingerprint if omitted)
        #[arg(long)]
        fingerprint: Option<PathBuf>,
    },
    /// Validate the stored token
    Validate {
        /// Check expiry only, ignore the fingerprint
        #[arg(long)]
        loose: bool,
        /// JSON file with the current fingerprint (demo fingerprint if omitted)
        #[arg(long, conflicts_with = "loose")]
        fingerprint: Option<PathBuf>,
        /// Exit with status 3 when the token is invalid
        #[arg(long)]
        exit_code: bool,
    },
    /// Print the stored token
    Show,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("No token found. Run: fptoken new")]
    NoToken,
    #[error("cannot read fingerprint {}: {reason}", .path.display())]
    Fingerprint { path: PathBuf, reason: String },
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("cannot render token: {0}")]
    Render(#[from] serde_json::Error),
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::NoToken => 1,
            CliError::Fingerprint { .. } | CliError::Token(_) => 2,
            CliError::Store(_) | CliError::Render(_) | CliError::Io(_) => 5,
        }
    }
}

fn load_fingerprint(path: Option<&Path>) -> Result<Snapshot, CliError> {
    let Some(path) = path else {
        return Ok(demo_fingerprint());
    };
    let fail = |reason: String| CliError::Fingerprint { path: path.to_path_buf(), reason };
    let text = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| fail(e.to_string()))
}

/// Ejecuta un comando escribiendo en `out`; devuelve el código de salida.
fn run(cli: Cli, out: &mut impl Write) -> Result<u8, CliError> {
    let config = StoreConfig::from_env();
    let store = JsonFileStore::new(cli.store.unwrap_or_else(|| config.path.clone()));

    let Some(command) = cli.command else {
        Cli::command().write_help(out)?;
        return Ok(0);
    };

    match command {
        Command::New { days, fingerprint } => {
            let days = days.unwrap_or(config.default_days);
            let snapshot = load_fingerprint(fingerprint.as_deref())?;
            let token = TokenIssuer::new().issue(&snapshot, days)?;
            store.save(&token)?;
            info!("token {} written to {}", token.uuid(), store.path().display());
            writeln!(out, "Created new UUID token ({days}-day validity):")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&token)?)?;
            Ok(0)
        }
        Command::Validate { loose, fingerprint, exit_code } => {
            let raw = store.load()?.ok_or(CliError::NoToken)?;
            let snapshot = if loose { None } else { Some(load_fingerprint(fingerprint.as_deref())?) };
            let verdict = TokenValidator::new().check_raw(&raw, ValidationMode::from(snapshot.as_ref()));
            if verdict.is_valid() {
                writeln!(out, "VALID ✅")?;
                return Ok(0);
            }
            writeln!(out, "INVALID ❌ ({verdict})")?;
            writeln!(out, "Stored token: {}", serde_json::to_string_pretty(&raw)?)?;
            if !loose {
                writeln!(out, "Tip: try loose validation with: fptoken validate --loose")?;
            }
            Ok(if exit_code { 3 } else { 0 })
        }
        Command::Show => {
            match store.load()? {
                Some(raw) => writeln!(out, "{}", serde_json::to_string_pretty(&raw)?)?,
                None => writeln!(out, "(no store)")?,
            }
            Ok(0)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(io::stderr)
                             .init();

    let cli = Cli::parse();
    match run(cli, &mut io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("[fptoken] {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_loose_validate_with_global_store() {
        let cli = Cli::try_parse_from(["fptoken", "validate", "--loose", "--store", "/tmp/x.json"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/x.json")));
        assert!(matches!(cli.command, Some(Command::Validate { loose: true, fingerprint: None, exit_code: false })));
    }

    #[test]
    fn loose_and_fingerprint_conflict() {
        assert!(Cli::try_parse_from(["fptoken", "validate", "--loose", "--fingerprint", "fp.json"]).is_err());
    }

    #[test]
    fn missing_fingerprint_file_is_reported() {
        let err = load_fingerprint(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_token_exits_with_one() {
        assert_eq!(CliError::NoToken.exit_code(), 1);
        assert_eq!(CliError::NoToken.to_string(), "No token found. Run: fptoken new");
    }

    struct Workspace {
        dir: tempfile::TempDir,
    }

    impl Workspace {
        fn new() -> Self { Self { dir: tempfile::tempdir().unwrap() } }

        fn store(&self) -> PathBuf { self.dir.path().join("t.json") }

        fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        }

        fn run(&self, args: &[&str]) -> (Result<u8, CliError>, String) {
            let mut argv = vec![OsString::from("fptoken"), OsString::from("--store"), self.store().into_os_string()];
            argv.extend(args.iter().map(OsString::from));
            let cli = Cli::try_parse_from(argv).unwrap();
            let mut out = Vec::new();
            let result = run(cli, &mut out);
            (result, String::from_utf8(out).unwrap())
        }
    }

    #[test]
    fn validate_without_token_fails_with_one() {
        let ws = Workspace::new();
        let (result, out) = ws.run(&["validate"]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::NoToken));
        assert_eq!(err.exit_code(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn new_then_validate_is_valid() {
        let ws = Workspace::new();
        let (result, out) = ws.run(&["new", "--days", "2"]);
        assert_eq!(result.unwrap(), 0);
        assert!(out.starts_with("Created new UUID token (2-day validity):"));
        assert!(ws.store().exists());

        let (result, out) = ws.run(&["validate"]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, "VALID ✅\n");
    }

    #[test]
    fn fingerprint_mismatch_prints_record_and_loose_tip() {
        let ws = Workspace::new();
        let other = ws.write("other.json", r#"{"userAgent": "curl/8.0"}"#);
        let (result, _) = ws.run(&["new", "--fingerprint", other.to_str().unwrap()]);
        assert_eq!(result.unwrap(), 0);

        let (result, out) = ws.run(&["validate"]);
        assert_eq!(result.unwrap(), 0);
        assert!(out.starts_with("INVALID ❌ (fingerprint mismatch)"));
        assert!(out.contains("Stored token: {"));
        assert!(out.contains("\"fingerprintHash\""));
        assert!(out.contains("fptoken validate --loose"));

        let (result, out) = ws.run(&["validate", "--loose"]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, "VALID ✅\n");
    }

    #[test]
    fn exit_code_flag_reports_invalid_as_three() {
        let ws = Workspace::new();
        let other = ws.write("other.json", r#"{"platform": "Linux"}"#);
        ws.run(&["new", "--fingerprint", other.to_str().unwrap()]).0.unwrap();
        let (result, _) = ws.run(&["validate", "--exit-code"]);
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn expired_record_fails_loose_without_tip() {
        let ws = Workspace::new();
        ws.write("t.json", r#"{"uuid": "x", "expiresAt": 0, "fingerprintHash": "00"}"#);
        let (result, out) = ws.run(&["validate", "--loose", "--exit-code"]);
        assert_eq!(result.unwrap(), 3);
        assert!(out.starts_with("INVALID ❌ (expired)"));
        assert!(!out.contains("Tip:"));
    }

    #[test]
    fn show_reports_empty_store_then_token() {
        let ws = Workspace::new();
        let (result, out) = ws.run(&["show"]);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, "(no store)\n");

        ws.run(&["new"]).0.unwrap();
        let (_, out) = ws.run(&["show"]);
        let shown: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(shown["expiresAt"].is_i64());
    }

    #[test]
    fn non_positive_days_is_a_token_error() {
        let ws = Workspace::new();
        let (result, _) = ws.run(&["new", "--days", "0"]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Token(TokenError::InvalidValidity(_))));
        assert_eq!(err.exit_code(), 2);
        assert!(!ws.store().exists());
    }

    #[test]
    fn without_subcommand_help_goes_to_output() {
        let ws = Workspace::new();
        let (result, out) = ws.run(&[]);
        assert_eq!(result.unwrap(), 0);
        assert!(out.contains("Usage"));
    }
}
