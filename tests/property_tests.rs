//! Property-based tests for the cache facade.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Round-trip identity over the encoded form for every scalar shape
//! - Counter and log lengths agree after arbitrary store sequences
//! - Log entry i corresponds to call i's argument and result
//! - Replay rendering always has header + one line per paired call

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use tracecache::instrument::render;
use tracecache::{Cache, MemoryBackend, Value};

/// Strategy producing one arbitrary scalar value.
fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,40}".prop_map(Value::Text),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Bytes),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(Value::Float),
    ]
}

proptest! {
    /// Property: `get(store(v))` returns v's encoded bytes.
    #[test]
    fn prop_round_trip_identity(value in any_value()) {
        let cache = Cache::new(MemoryBackend::new()).unwrap();
        let key = cache.store(value.clone()).unwrap();
        prop_assert_eq!(cache.get(&key).unwrap(), Some(value.encode()));
    }

    /// Property: after N stores, counter == N == input log == output log.
    #[test]
    fn prop_counter_matches_log_lengths(values in prop::collection::vec(any_value(), 0..20)) {
        let cache = Cache::new(MemoryBackend::new()).unwrap();
        for value in &values {
            cache.store(value.clone()).unwrap();
        }

        let method = cache.store_method();
        let count = cache.call_count(method).unwrap();
        let history = cache.call_history(method).unwrap();

        prop_assert_eq!(count, values.len() as u64);
        prop_assert_eq!(history.inputs().len(), values.len());
        prop_assert_eq!(history.outputs().len(), values.len());
    }

    /// Property: log entry i holds call i's rendered argument and key.
    #[test]
    fn prop_log_entries_match_call_order(values in prop::collection::vec(any_value(), 1..10)) {
        let cache = Cache::new(MemoryBackend::new()).unwrap();
        let mut keys = Vec::new();
        for value in &values {
            keys.push(cache.store(value.clone()).unwrap());
        }

        let history = cache.call_history(cache.store_method()).unwrap();
        for (i, value) in values.iter().enumerate() {
            prop_assert_eq!(&history.inputs()[i], &value.to_string());
            prop_assert_eq!(&history.outputs()[i], &keys[i].to_string());
        }
    }

    /// Property: rendering is one header line plus one line per call.
    /// Restricted to text values so log entries stay single-line.
    #[test]
    fn prop_render_line_count(
        values in prop::collection::vec("[a-zA-Z0-9 ]{0,20}".prop_map(Value::Text), 0..10)
    ) {
        let cache = Cache::new(MemoryBackend::new()).unwrap();
        for value in &values {
            cache.store(value.clone()).unwrap();
        }

        let history = cache.call_history(cache.store_method()).unwrap();
        let rendered = render(&history);

        let expected_prefix = format!(
            "Cache.store was called {} times:\n",
            values.len()
        );
        prop_assert!(rendered.starts_with(&expected_prefix));
        prop_assert_eq!(rendered.lines().count(), values.len() + 1);
    }
}
