//! In-memory key-value backend.
//!
//! Mirrors the Redis primitive semantics in-process: counters are stored
//! as ASCII integers, list ranges accept negative indices, and every
//! operation is individually atomic behind a mutex. Used by tests and by
//! the demo binary's offline mode.

use crate::models::Value;
use crate::storage::traits::KvBackend;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Backend state: scalars and lists live in separate maps, as they do in
/// the Redis keyspace type system.
#[derive(Debug, Default)]
struct State {
    scalars: HashMap<String, Vec<u8>>,
    lists: HashMap<String, Vec<String>>,
}

/// In-memory key-value store with Redis-equivalent primitive semantics.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>> {
        self.state.lock().map_err(|e| Error::OperationFailed {
            operation: "memory_lock".to_string(),
            cause: e.to_string(),
        })
    }
}

/// Resolves a possibly-negative range index against a list length,
/// clamping the way Redis `LRANGE` does.
fn resolve_index(index: isize, len: usize, is_stop: bool) -> usize {
    let len = len as isize;
    let resolved = if index < 0 { len + index } else { index };
    let clamped = resolved.clamp(0, if is_stop { len - 1 } else { len });
    usize::try_from(clamped).unwrap_or(0)
}

impl KvBackend for MemoryBackend {
    fn flush(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.scalars.clear();
        state.lists.clear();
        Ok(())
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let mut state = self.lock()?;
        state.scalars.insert(key.to_string(), value.encode());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let state = self.lock()?;
        Ok(state.scalars.get(key).cloned())
    }

    fn incr(&self, key: &str) -> Result<i64> {
        let mut state = self.lock()?;
        let current = match state.scalars.get(key) {
            None => 0,
            Some(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| Error::OperationFailed {
                    operation: "memory_incr".to_string(),
                    cause: format!("value at '{key}' is not an integer"),
                })?,
        };
        let next = current + 1;
        state
            .scalars
            .insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    fn list_append(&self, key: &str, item: &str) -> Result<()> {
        let mut state = self.lock()?;
        state
            .lists
            .entry(key.to_string())
            .or_default()
            .push(item.to_string());
        Ok(())
    }

    fn list_range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let state = self.lock()?;
        let Some(items) = state.lists.get(key) else {
            return Ok(Vec::new());
        };
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let from = resolve_index(start, items.len(), false);
        let to = resolve_index(stop, items.len(), true);
        if from > to {
            return Ok(Vec::new());
        }
        Ok(items[from..=to].to_vec())
    }
}
