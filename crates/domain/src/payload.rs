//! Open key-value payload carried by bus messages and device configs.
//!
//! Payload shapes vary per device type, so this is an open JSON-object
//! mapping with typed accessors for the well-known optional fields rather
//! than a fixed struct per device kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed JSON-object payload.
///
/// Deserialization only accepts a JSON object; any other JSON value fails,
/// which is what distinguishes a malformed message at the ingestion
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(serde_json::Map<String, Value>);

impl Payload {
    /// Look up a raw field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Whether the payload carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The device-reported `status` string, when present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    /// The `brightness` level, when present.
    #[must_use]
    pub fn brightness(&self) -> Option<f64> {
        self.get("brightness").and_then(Value::as_f64)
    }

    /// The fan `speed`, when present.
    #[must_use]
    pub fn speed(&self) -> Option<f64> {
        self.get("speed").and_then(Value::as_f64)
    }

    /// The target `temperature`, when present.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.get("temperature").and_then(Value::as_f64)
    }

    /// The operating `mode` string, when present.
    #[must_use]
    pub fn mode(&self) -> Option<&str> {
        self.get("mode").and_then(Value::as_str)
    }

    /// The instantaneous `power_watts` reading, when present and numeric.
    #[must_use]
    pub fn power_watts(&self) -> Option<f64> {
        self.get("power_watts").and_then(Value::as_f64)
    }

    /// Whether the payload carries a truthy `motion_detected` field.
    ///
    /// Truthiness follows the loose convention the simulators use: `true`,
    /// a non-zero number, or a non-empty string/array/object all count.
    #[must_use]
    pub fn motion_detected(&self) -> bool {
        self.get("motion_detected").is_some_and(is_truthy)
    }

    /// View the payload as a JSON value, e.g. for serialization into logs.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
