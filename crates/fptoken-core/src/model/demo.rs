use super::Snapshot;

/// Fingerprint de demostración usado por la CLI y el binario de ejemplo
/// cuando no se proporciona uno propio.
pub fn demo_fingerprint() -> Snapshot {
    Snapshot::mapping([("userAgent", Snapshot::from("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")),
                       ("platform", Snapshot::from("Win32")),
                       ("language", Snapshot::from("en-US")),
                       ("timezone", Snapshot::from("America/New_York")),
                       ("screen", Snapshot::mapping([("width", 1920), ("height", 1080), ("colorDepth", 24)])),
                       ("cookieEnabled", Snapshot::from(true)),
                       ("devToolsOpen", Snapshot::from(false))])
}
