//! Snapshot de atributos del cliente (fingerprint).
//!
//! Árbol cerrado de valores: el encoder canónico está definido de forma
//! exhaustiva sobre este tipo. Las entradas externas (JSON) se convierten en
//! el borde mediante `TryFrom<serde_json::Value>`; un árbol propio no puede
//! contener ciclos, así que la única entrada malformada posible es un
//! anidamiento patológico.
use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::constants::MAX_SNAPSHOT_DEPTH;
use crate::errors::TokenError;

/// Número de un snapshot. Conserva enteros exactos y admite flotantes no
/// finitos (NaN, ±Infinity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Snapshot {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Snapshot>),
    /// Las claves quedan ordenadas por código; una clave repetida conserva
    /// el último valor insertado.
    Mapping(BTreeMap<String, Snapshot>),
}

impl Snapshot {
    /// Construye un mapping a partir de pares clave/valor.
    pub fn mapping<I, K, V>(entries: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<Snapshot>
    {
        Snapshot::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn sequence<I, V>(items: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Snapshot>
    {
        Snapshot::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn get(&self, key: &str) -> Option<&Snapshot> {
        match self {
            Snapshot::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Nivel de anidamiento máximo (un escalar tiene profundidad 0).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            match node {
                Snapshot::Sequence(items) => stack.extend(items.iter().map(|c| (c, depth + 1))),
                Snapshot::Mapping(map) => stack.extend(map.values().map(|c| (c, depth + 1))),
                _ => {}
            }
        }
        max
    }

    /// `TokenError::MalformedInput` si el anidamiento supera `MAX_SNAPSHOT_DEPTH`.
    pub fn ensure_depth(&self) -> Result<(), TokenError> {
        let depth = self.depth();
        if depth > MAX_SNAPSHOT_DEPTH {
            return Err(TokenError::MalformedInput(format!("nesting of {depth} levels exceeds {MAX_SNAPSHOT_DEPTH}")));
        }
        Ok(())
    }
}

impl From<bool> for Snapshot {
    fn from(b: bool) -> Self { Snapshot::Bool(b) }
}
impl From<&str> for Snapshot {
    fn from(s: &str) -> Self { Snapshot::String(s.to_string()) }
}
impl From<String> for Snapshot {
    fn from(s: String) -> Self { Snapshot::String(s) }
}
impl From<i32> for Snapshot {
    fn from(n: i32) -> Self { Snapshot::Number(Number::Int(n.into())) }
}
impl From<i64> for Snapshot {
    fn from(n: i64) -> Self { Snapshot::Number(Number::Int(n)) }
}
impl From<u32> for Snapshot {
    fn from(n: u32) -> Self { Snapshot::Number(Number::Int(n.into())) }
}
impl From<u64> for Snapshot {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Snapshot::Number(Number::Int(i)),
            Err(_) => Snapshot::Number(Number::UInt(n)),
        }
    }
}
impl From<f64> for Snapshot {
    fn from(f: f64) -> Self { Snapshot::Number(Number::Float(f)) }
}
impl<T: Into<Snapshot>> From<Option<T>> for Snapshot {
    fn from(v: Option<T>) -> Self { v.map_or(Snapshot::Null, Into::into) }
}
impl From<Vec<Snapshot>> for Snapshot {
    fn from(items: Vec<Snapshot>) -> Self { Snapshot::Sequence(items) }
}
impl From<BTreeMap<String, Snapshot>> for Snapshot {
    fn from(map: BTreeMap<String, Snapshot>) -> Self { Snapshot::Mapping(map) }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl TryFrom<Value> for Snapshot {
    type Error = TokenError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        from_json(value, 0)
    }
}

fn from_json(value: Value, depth: usize) -> Result<Snapshot, TokenError> {
    if depth > MAX_SNAPSHOT_DEPTH {
        return Err(TokenError::MalformedInput(format!("nesting deeper than {MAX_SNAPSHOT_DEPTH} levels")));
    }
    let snapshot = match value {
        Value::Null => Snapshot::Null,
        Value::Bool(b) => Snapshot::Bool(b),
        Value::Number(n) => Snapshot::Number(Number::from(&n)),
        Value::String(s) => Snapshot::String(s),
        Value::Array(items) => Snapshot::Sequence(items.into_iter()
                                                       .map(|v| from_json(v, depth + 1))
                                                       .collect::<Result<_, _>>()?),
        Value::Object(map) => Snapshot::Mapping(map.into_iter()
                                                   .map(|(k, v)| Ok((k, from_json(v, depth + 1)?)))
                                                   .collect::<Result<_, TokenError>>()?),
    };
    Ok(snapshot)
}
