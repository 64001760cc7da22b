//! Method identity for instrumented operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable name identifying an instrumented operation.
///
/// The name is passed explicitly at registration time (e.g. `Cache.store`)
/// and doubles as the backend key for the operation's call counter. The
/// input and output logs live under derived keys with `:inputs` and
/// `:outputs` suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodName(String);

impl MethodName {
    /// Creates a method name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backend key holding the call counter.
    #[must_use]
    pub fn counter_key(&self) -> &str {
        &self.0
    }

    /// Backend key holding the input log.
    #[must_use]
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    /// Backend key holding the output log.
    #[must_use]
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MethodName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
