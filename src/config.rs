//! Configuration management.

use std::time::Duration;

/// Default Redis connection URL.
const DEFAULT_URL: &str = "redis://localhost:6379";

/// Default response timeout for backend commands, in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Backend connection URL. The Redis logical database in the URL
    /// selects the namespace the facade flushes and writes to.
    pub url: String,
    /// Response timeout for backend commands, in milliseconds.
    pub response_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            response_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl CacheConfig {
    /// Loads configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    ///
    /// Recognizes `TRACECACHE_REDIS_URL` and `TRACECACHE_TIMEOUT_REDIS_MS`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("TRACECACHE_REDIS_URL") {
            if !v.is_empty() {
                self.url = v;
            }
        }
        if let Ok(v) = std::env::var("TRACECACHE_TIMEOUT_REDIS_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.response_timeout_ms = parsed.max(1);
            }
        }
        self
    }

    /// Sets the connection URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the response timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.response_timeout_ms = timeout_ms;
        self
    }

    /// The response timeout as a [`Duration`].
    #[must_use]
    pub const fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}
