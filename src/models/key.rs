//! Record identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stored record.
///
/// Keys are generated from random UUIDs at store time. Collisions are
/// assumed impossible and are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Creates a key from an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = RecordKey::generate();
        let b = RecordKey::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_key_is_uuid_shaped() {
        let key = RecordKey::generate();
        assert_eq!(key.as_str().len(), 36);
        assert_eq!(key.as_str().matches('-').count(), 4);
    }

    #[test]
    fn test_display_matches_as_str() {
        let key = RecordKey::new("abc-123");
        assert_eq!(key.to_string(), key.as_str());
    }
}
