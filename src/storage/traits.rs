//! Key-value backend trait.

use crate::models::Value;
use crate::Result;

/// Trait for key-value backends.
///
/// Each method maps to a single atomic backend operation. The cache relies
/// on that per-operation atomicity; it never holds locks across calls.
pub trait KvBackend: Send + Sync {
    /// Destructively clears all keys in the active namespace.
    fn flush(&self) -> Result<()>;

    /// Stores or overwrites a scalar under `key`.
    fn set(&self, key: &str, value: &Value) -> Result<()>;

    /// Returns the stored bytes, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments an integer counter, creating it at zero if
    /// absent. Returns the new value.
    fn incr(&self, key: &str) -> Result<i64>;

    /// Appends an item to the ordered list under `key`.
    fn list_append(&self, key: &str, item: &str) -> Result<()>;

    /// Reads items `start..=stop` from the list under `key`, in append
    /// order. Negative indices count from the end; `(0, -1)` reads the
    /// full list. An absent key reads as an empty list.
    fn list_range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>>;
}
