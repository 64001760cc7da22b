//! # Tracecache
//!
//! An instrumented key-value cache facade with call counting and history
//! replay.
//!
//! Tracecache wraps a key-value backend (Redis in production, an in-memory
//! store for tests) and records, for each instrumented operation, how many
//! times it was called and the serialized arguments and results of every
//! call. The recorded history can be read back and replayed for debugging.
//!
//! ## Features
//!
//! - Store text, binary, integer, and float scalars under generated keys
//! - Typed retrieval with optional conversion (`get_str`, `get_int`)
//! - Per-method call counters and append-only input/output logs
//! - History replay rendered as `method(args) -> result` lines
//! - Pluggable backends behind the [`KvBackend`] trait
//!
//! ## Example
//!
//! ```rust
//! use tracecache::{Cache, MemoryBackend};
//!
//! # fn main() -> tracecache::Result<()> {
//! let cache = Cache::new(MemoryBackend::new())?;
//! let key = cache.store("hello")?;
//! assert_eq!(cache.get_str(&key)?, Some("hello".to_string()));
//! assert_eq!(cache.call_count(cache.store_method())?, 1);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cache;
pub mod config;
pub mod instrument;
pub mod models;
pub mod storage;

// Re-exports for convenience
pub use cache::Cache;
pub use config::CacheConfig;
pub use instrument::{replay, CallHistory, Counted, Logged, StoreOp};
pub use models::{MethodName, RecordKey, Value};
pub use storage::{KvBackend, MemoryBackend, RedisBackend};

/// Error type for tracecache operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait
/// implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Conversion of stored bytes fails, malformed CLI input |
/// | `OperationFailed` | Backend connection or command failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - `get_str` reads bytes that are not valid UTF-8
    /// - `get_int` reads bytes that do not parse as an integer
    /// - A stored counter holds a non-numeric value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The backend connection cannot be established
    /// - A backend command returns an error
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for tracecache operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("bad bytes".to_string());
        assert_eq!(err.to_string(), "invalid input: bad bytes");

        let err = Error::OperationFailed {
            operation: "redis_connect".to_string(),
            cause: "refused".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'redis_connect' failed: refused");
    }
}
