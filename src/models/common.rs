//! Common types shared across TeamDynamix API models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque remote identifier.
///
/// TeamDynamix mixes identifier shapes: application, status, location, and
/// attribute identifiers are small integers, while person and owner
/// identifiers are GUID strings. `RefId` carries either form and serializes
/// back exactly as it arrived, so identifiers can be dropped into request
/// bodies and URL paths without caring which shape they are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefId {
    /// A numeric identifier (most categories).
    Number(i64),
    /// A string identifier, typically a GUID.
    Text(String),
}

impl RefId {
    /// Extracts a `RefId` from a JSON value, if it holds one.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        if let Some(n) = value.as_i64() {
            Some(RefId::Number(n))
        } else {
            value.as_str().map(|s| RefId::Text(s.to_string()))
        }
    }

    /// Returns the numeric form, if this identifier is numeric.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            RefId::Number(n) => Some(*n),
            RefId::Text(_) => None,
        }
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefId::Number(n) => write!(f, "{}", n),
            RefId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RefId {
    fn from(n: i64) -> Self {
        RefId::Number(n)
    }
}

impl From<&str> for RefId {
    fn from(s: &str) -> Self {
        RefId::Text(s.to_string())
    }
}

impl From<String> for RefId {
    fn from(s: String) -> Self {
        RefId::Text(s)
    }
}
