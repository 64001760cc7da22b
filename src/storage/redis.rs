//! Redis key-value backend.
//!
//! # Connection Pooling
//!
//! This backend reuses a single connection per instance. For
//! high-concurrency scenarios, consider `r2d2-redis` or `deadpool-redis`
//! for connection pooling. The current implementation is suitable for CLI
//! and single-threaded embedding.
//!
//! # Command Timeout
//!
//! Redis operations use a configurable response timeout (5 seconds by
//! default) to prevent indefinite blocking on slow or unresponsive
//! servers.

use crate::config::CacheConfig;
use crate::models::Value;
use crate::storage::traits::KvBackend;
use crate::{Error, Result};
use redis::{Client, Commands, Connection};
use std::sync::Mutex;
use std::time::Duration;

/// Redis-backed key-value store.
///
/// Maintains a reusable connection via `Mutex<Option<Connection>>`. The
/// connection is lazily initialized and reused across operations to avoid
/// the overhead of establishing new connections for each command.
///
/// The active namespace is the Redis logical database selected by the
/// connection URL (e.g. `redis://localhost:6379/0`); [`KvBackend::flush`]
/// clears that database.
pub struct RedisBackend {
    /// Redis client.
    client: Client,
    /// Cached connection for reuse.
    connection: Mutex<Option<Connection>>,
    /// Response timeout applied to new connections.
    timeout: Duration,
}

impl RedisBackend {
    /// Creates a new Redis backend for the given connection URL.
    ///
    /// The first connection is established eagerly so that an unreachable
    /// server surfaces at construction time rather than on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis connection fails.
    pub fn new(connection_url: &str) -> Result<Self> {
        Self::with_timeout(connection_url, CacheConfig::default().response_timeout())
    }

    /// Creates a backend from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis connection fails.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::with_timeout(&config.url, config.response_timeout())
    }

    /// Creates a backend with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis connection fails.
    pub fn with_defaults() -> Result<Self> {
        Self::new("redis://localhost:6379")
    }

    /// Creates a backend with an explicit response timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis connection fails.
    pub fn with_timeout(connection_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::open(connection_url).map_err(|e| Error::OperationFailed {
            operation: "redis_connect".to_string(),
            cause: e.to_string(),
        })?;

        let backend = Self {
            client,
            connection: Mutex::new(None),
            timeout,
        };

        // Establish the first connection up front
        let conn = backend.get_connection()?;
        backend.return_connection(conn);

        Ok(backend)
    }

    /// Gets a connection, reusing the cached one if available.
    ///
    /// Falls back to creating a new connection if the cache is empty. A
    /// connection that fails mid-operation is simply dropped; the next
    /// call creates a fresh one.
    fn get_connection(&self) -> Result<Connection> {
        let mut guard = self.connection.lock().map_err(|e| Error::OperationFailed {
            operation: "redis_lock_connection".to_string(),
            cause: e.to_string(),
        })?;

        if let Some(conn) = guard.take() {
            return Ok(conn);
        }
        drop(guard);

        let conn = self
            .client
            .get_connection()
            .map_err(|e| Error::OperationFailed {
                operation: "redis_get_connection".to_string(),
                cause: e.to_string(),
            })?;

        // Set response timeouts to prevent indefinite blocking
        conn.set_read_timeout(Some(self.timeout))
            .map_err(|e| Error::OperationFailed {
                operation: "redis_set_read_timeout".to_string(),
                cause: e.to_string(),
            })?;
        conn.set_write_timeout(Some(self.timeout))
            .map_err(|e| Error::OperationFailed {
                operation: "redis_set_write_timeout".to_string(),
                cause: e.to_string(),
            })?;

        Ok(conn)
    }

    /// Returns a connection to the cache for reuse.
    fn return_connection(&self, conn: Connection) {
        if let Ok(mut guard) = self.connection.lock() {
            *guard = Some(conn);
        }
        // If the lock fails, just drop the connection
    }

    /// Runs a command against a cached connection, mapping failures to
    /// [`Error::OperationFailed`] tagged with `operation`.
    fn with_connection<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> redis::RedisResult<T>,
    {
        let mut conn = self.get_connection()?;
        let result = call(&mut conn);
        match result {
            Ok(value) => {
                self.return_connection(conn);
                Ok(value)
            },
            Err(e) => {
                // Drop the possibly-broken connection
                tracing::warn!(operation, error = %e, "Redis command failed");
                Err(Error::OperationFailed {
                    operation: operation.to_string(),
                    cause: e.to_string(),
                })
            },
        }
    }
}

impl KvBackend for RedisBackend {
    fn flush(&self) -> Result<()> {
        self.with_connection("redis_flush", |conn| {
            redis::cmd("FLUSHDB").query::<()>(conn)
        })
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let bytes = value.encode();
        self.with_connection("redis_set", |conn| conn.set(key, bytes))
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.with_connection("redis_get", |conn| conn.get(key))
    }

    fn incr(&self, key: &str) -> Result<i64> {
        self.with_connection("redis_incr", |conn| conn.incr(key, 1i64))
    }

    fn list_append(&self, key: &str, item: &str) -> Result<()> {
        self.with_connection("redis_rpush", |conn| conn.rpush(key, item))
    }

    fn list_range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        self.with_connection("redis_lrange", |conn| conn.lrange(key, start, stop))
    }
}
