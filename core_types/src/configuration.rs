//! Configuration-change payload

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Structured value describing a host configuration change
///
/// The coordinator never inspects it; every unit receives the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Value);

impl Configuration {
    /// Wraps a structured value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An empty configuration object
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Returns the underlying value
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Looks up a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Consumes the configuration, returning the underlying value
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Configuration {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
