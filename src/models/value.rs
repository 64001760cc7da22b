//! Storable scalar values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value accepted by the cache.
///
/// Covers the four supported shapes. All variants encode to bytes for
/// storage; numbers use their ASCII decimal form, matching how the
/// backend itself represents counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
}

impl Value {
    /// Encodes the value to its stored byte representation.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Text(s) => s.clone().into_bytes(),
            Self::Bytes(b) => b.clone(),
            Self::Int(i) => i.to_string().into_bytes(),
            Self::Float(f) => f.to_string().into_bytes(),
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value for call-history logs.
    ///
    /// Non-UTF-8 bytes are rendered lossily; the log is a display
    /// artifact, not a round-trippable encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Value::Text("hello".to_string()), b"hello"; "text")]
    #[test_case(Value::Bytes(vec![0xde, 0xad]), &[0xde, 0xad]; "bytes")]
    #[test_case(Value::Int(123), b"123"; "int")]
    #[test_case(Value::Int(-7), b"-7"; "negative int")]
    #[test_case(Value::Float(2.5), b"2.5"; "float")]
    fn test_encode(value: Value, expected: &[u8]) {
        assert_eq!(value.encode(), expected);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from("a"), Value::Text("a".to_string()));
        assert_eq!(Value::from(vec![1u8]), Value::Bytes(vec![1]));
        assert_eq!(Value::from(5i64), Value::Int(5));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
    }

    #[test]
    fn test_display_renders_scalars() {
        assert_eq!(Value::Text("hi".to_string()).to_string(), "hi");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Bytes(b"raw".to_vec()).to_string(), "raw");
    }
}
