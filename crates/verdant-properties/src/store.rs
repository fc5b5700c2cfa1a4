//! Typed key-value storage used by the property serializer.
//!
//! Hosts persist block and item data as flat, string-keyed compounds with a
//! handful of primitive value types. [`KeyValueStore`] is that seam: the
//! serializer only ever calls the typed accessors, so any host compound can
//! be adapted by implementing [`KeyValueStore::get`] and
//! [`KeyValueStore::put`].
//!
//! [`CompoundStore`] is the in-memory implementation. It derives `serde`
//! support so the same compound can be read straight out of a YAML config
//! file or written to JSON alongside a saved soil plot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PropertyError;

/// A primitive value held under one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
}

impl Value {
    /// Short name of the value type, for error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }
}

/// A string-keyed store of primitive values.
///
/// Only [`get`](Self::get) and [`put`](Self::put) are required; the typed
/// accessors are provided and report a missing key or a value of the wrong
/// type as [`PropertyError::MalformedData`]. Nothing is ever defaulted.
pub trait KeyValueStore {
    /// The raw value under `key`, if any.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: Value);

    /// Whether a value is stored under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Read a boolean.
    fn get_bool(&self, key: &str) -> Result<bool, PropertyError> {
        match require(self.get(key), key)? {
            Value::Bool(b) => Ok(*b),
            other => Err(wrong_type(key, "bool", other)),
        }
    }

    /// Read an integer.
    fn get_int(&self, key: &str) -> Result<i64, PropertyError> {
        match require(self.get(key), key)? {
            Value::Int(i) => Ok(*i),
            other => Err(wrong_type(key, "int", other)),
        }
    }

    /// Read a float.
    ///
    /// Integers are widened, since hand-written config files routinely say
    /// `25` where they mean `25.0`. Integers outside the `i32` range
    /// saturate at its bounds and are clamped by the consumer like any
    /// other out-of-range number.
    fn get_float(&self, key: &str) -> Result<f64, PropertyError> {
        match require(self.get(key), key)? {
            Value::Float(f) if f.is_nan() => Err(PropertyError::malformed(key, "value is NaN")),
            Value::Float(f) => Ok(*f),
            Value::Int(i) => {
                let bound = if *i < 0 { i32::MIN } else { i32::MAX };
                let saturated = i32::try_from(*i).unwrap_or(bound);
                Ok(f64::from(saturated))
            }
            other => Err(wrong_type(key, "float", other)),
        }
    }

    /// Read a string.
    fn get_string(&self, key: &str) -> Result<&str, PropertyError> {
        match require(self.get(key), key)? {
            Value::Str(s) => Ok(s.as_str()),
            other => Err(wrong_type(key, "string", other)),
        }
    }

    /// Store a boolean.
    fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, Value::Bool(value));
    }

    /// Store an integer.
    fn put_int(&mut self, key: &str, value: i64) {
        self.put(key, Value::Int(value));
    }

    /// Store a float.
    fn put_float(&mut self, key: &str, value: f64) {
        self.put(key, Value::Float(value));
    }

    /// Store a string.
    fn put_string(&mut self, key: &str, value: &str) {
        self.put(key, Value::Str(value.to_owned()));
    }
}

fn require<'a>(value: Option<&'a Value>, key: &str) -> Result<&'a Value, PropertyError> {
    value.ok_or_else(|| PropertyError::malformed(key, "missing key"))
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> PropertyError {
    PropertyError::malformed(key, format!("expected {expected}, found {}", found.kind()))
}

// ---------------------------------------------------------------------------
// CompoundStore
// ---------------------------------------------------------------------------

/// In-memory [`KeyValueStore`] with deterministic (sorted) key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundStore {
    entries: BTreeMap<String, Value>,
}

impl CompoundStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Iterate over the stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }
}

impl KeyValueStore for CompoundStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_owned(), value);
    }
}
