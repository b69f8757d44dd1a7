//! Canonical JSON sobre `Snapshot`.
//!
//! - Claves de mappings ordenadas por código (las aporta el `BTreeMap`).
//! - Secuencias en el orden recibido.
//! - Sin espacios.
//! - Números no finitos como texto entrecomillado (`"NaN"`, `"Infinity"`).
//! - Un flotante entero (`1.0`) se escribe igual que el entero `1`.
//!
//! El recorrido usa una pila explícita: la profundidad del snapshot no
//! consume stack del hilo.

use crate::model::{Number, Snapshot};

/// Mayor entero representable sin pérdida en un `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

enum Frame<'a> {
    Value(&'a Snapshot),
    Key(&'a str),
    Text(&'static str),
}

pub fn to_canonical_json(value: &Snapshot) -> String {
    let mut out = String::new();
    let mut stack = vec![Frame::Value(value)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Text(t) => out.push_str(t),
            Frame::Key(k) => {
                out.push_str(&quote(k));
                out.push(':');
            }
            Frame::Value(Snapshot::Null) => out.push_str("null"),
            Frame::Value(Snapshot::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
            Frame::Value(Snapshot::Number(n)) => out.push_str(&canonical_number(n)),
            Frame::Value(Snapshot::String(s)) => out.push_str(&quote(s)),
            Frame::Value(Snapshot::Sequence(items)) => {
                out.push('[');
                stack.push(Frame::Text("]"));
                // apilados al revés para desapilar en orden
                for (i, item) in items.iter().enumerate().rev() {
                    stack.push(Frame::Value(item));
                    if i > 0 {
                        stack.push(Frame::Text(","));
                    }
                }
            }
            Frame::Value(Snapshot::Mapping(map)) => {
                out.push('{');
                stack.push(Frame::Text("}"));
                for (i, (k, v)) in map.iter().enumerate().rev() {
                    stack.push(Frame::Value(v));
                    stack.push(Frame::Key(k));
                    if i > 0 {
                        stack.push(Frame::Text(","));
                    }
                }
            }
        }
    }
    out
}

/// Bytes que alimentan el hash del fingerprint.
pub fn to_canonical_bytes(value: &Snapshot) -> Vec<u8> {
    to_canonical_json(value).into_bytes()
}

fn canonical_number(n: &Number) -> String {
    match *n {
        Number::Int(i) => i.to_string(),
        Number::UInt(u) => u.to_string(),
        Number::Float(f) if f.is_nan() => quote("NaN"),
        Number::Float(f) if f.is_infinite() => quote(if f > 0.0 { "Infinity" } else { "-Infinity" }),
        Number::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => (f as i64).to_string(),
        Number::Float(f) => f.to_string(),
    }
}

// Literal JSON de string; `Value::to_string` no puede fallar.
fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
