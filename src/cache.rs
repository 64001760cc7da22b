//! Instrumented cache facade.

use crate::config::CacheConfig;
use crate::instrument::{CallHistory, Counted, Logged, StoreOp};
use crate::models::{MethodName, RecordKey, Value};
use crate::storage::{KvBackend, RedisBackend};
use crate::{Error, Result};

/// Base store operation: generate a key, write the value under it.
struct StoreValue {
    name: MethodName,
}

impl StoreValue {
    fn new() -> Self {
        Self {
            name: MethodName::new("Cache.store"),
        }
    }
}

impl StoreOp for StoreValue {
    type Args = Value;
    type Output = RecordKey;

    fn name(&self) -> &MethodName {
        &self.name
    }

    fn invoke<B: KvBackend>(&self, backend: &B, value: Value) -> Result<RecordKey> {
        let key = RecordKey::generate();
        backend.set(key.as_str(), &value)?;
        Ok(key)
    }
}

/// Instrumented cache facade over a key-value backend.
///
/// Wraps the backend's scalar operations and instruments `store` with
/// call counting and input/output history logging, composed as
/// `Counted<Logged<StoreValue>>`. Retrieval operations are plain
/// pass-throughs.
///
/// Construction flushes the backend's active namespace, so each facade
/// instance starts from empty state. A facade owns its backend
/// exclusively; two instances sharing one namespace would interleave
/// their counters and logs.
pub struct Cache<B: KvBackend> {
    backend: B,
    store_op: Counted<Logged<StoreValue>>,
}

impl Cache<RedisBackend> {
    /// Connects to Redis using `config` and builds a facade over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the namespace flush fails.
    pub fn connect(config: &CacheConfig) -> Result<Self> {
        Self::new(RedisBackend::from_config(config)?)
    }
}

impl<B: KvBackend> Cache<B> {
    /// Builds a facade over `backend`, flushing its active namespace.
    ///
    /// This wipes any pre-existing data in the namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn new(backend: B) -> Result<Self> {
        backend.flush()?;
        tracing::debug!("cache namespace flushed");
        Ok(Self {
            backend,
            store_op: Counted::new(Logged::new(StoreValue::new())),
        })
    }

    /// Stores a scalar value under a freshly generated key.
    ///
    /// Every call appends its argument to the `store` input log, performs
    /// the write, appends the returned key to the output log, and
    /// increments the `store` call counter.
    ///
    /// # Errors
    ///
    /// Returns an error if any backend operation fails.
    pub fn store(&self, value: impl Into<Value>) -> Result<RecordKey> {
        self.store_op.invoke(&self.backend, value.into())
    }

    /// Looks up the raw bytes stored under `key`.
    ///
    /// An absent key is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend lookup fails.
    pub fn get(&self, key: &RecordKey) -> Result<Option<Vec<u8>>> {
        self.backend.get(key.as_str())
    }

    /// Looks up `key` and applies `convert` to the raw bytes if present.
    ///
    /// Converter failures propagate to the caller unchanged. Garbage in,
    /// failure out.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend lookup or the conversion fails.
    pub fn get_with<T, F>(&self, key: &RecordKey, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(&[u8]) -> Result<T>,
    {
        match self.get(key)? {
            None => Ok(None),
            Some(bytes) => Ok(Some(convert(&bytes)?)),
        }
    }

    /// Looks up `key` and decodes the stored bytes as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the bytes are not valid UTF-8.
    pub fn get_str(&self, key: &RecordKey) -> Result<Option<String>> {
        self.get_with(key, |bytes| {
            String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::InvalidInput(format!("stored value is not UTF-8: {e}")))
        })
    }

    /// Looks up `key` and parses the stored bytes as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the bytes do not parse as an
    /// integer.
    pub fn get_int(&self, key: &RecordKey) -> Result<Option<i64>> {
        self.get_with(key, |bytes| {
            std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| Error::InvalidInput("stored value is not an integer".to_string()))
        })
    }

    /// Reads the call counter for `method`.
    ///
    /// An absent counter reads as 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or the counter value is not
    /// numeric.
    pub fn call_count(&self, method: &MethodName) -> Result<u64> {
        match self.backend.get(method.counter_key())? {
            None => Ok(0),
            Some(bytes) => std::str::from_utf8(&bytes)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| {
                    Error::InvalidInput(format!("counter for '{method}' is not numeric"))
                }),
        }
    }

    /// Reads the full input and output logs for `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend read fails.
    pub fn call_history(&self, method: &MethodName) -> Result<CallHistory> {
        let inputs = self.backend.list_range(&method.inputs_key(), 0, -1)?;
        let outputs = self.backend.list_range(&method.outputs_key(), 0, -1)?;
        Ok(CallHistory::new(method.clone(), inputs, outputs))
    }

    /// The stable name of the instrumented `store` operation.
    #[must_use]
    pub fn store_method(&self) -> &MethodName {
        self.store_op.name()
    }

    /// Returns a reference to the underlying backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}
