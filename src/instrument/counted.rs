//! Call counting wrapper.

use super::StoreOp;
use crate::storage::KvBackend;
use crate::Result;

/// Wrapper that counts invocations of the inner operation.
///
/// The counter lives in the backend under the operation's counter key and
/// is incremented after the inner call returns successfully. An inner
/// failure propagates without advancing the counter, keeping it in step
/// with the output log of a [`Logged`](super::Logged) inner operation.
pub struct Counted<Op> {
    inner: Op,
}

impl<Op> Counted<Op> {
    /// Wraps an operation with call counting.
    pub const fn new(inner: Op) -> Self {
        Self { inner }
    }
}

impl<Op: StoreOp> StoreOp for Counted<Op> {
    type Args = Op::Args;
    type Output = Op::Output;

    fn name(&self) -> &crate::models::MethodName {
        self.inner.name()
    }

    fn invoke<B: KvBackend>(&self, backend: &B, args: Self::Args) -> Result<Self::Output> {
        let output = self.inner.invoke(backend, args)?;
        let count = backend.incr(self.name().counter_key())?;
        tracing::debug!(method = %self.name(), count, "call counted");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MethodName;
    use crate::storage::MemoryBackend;
    use crate::Error;

    /// Probe operation that echoes its argument, optionally failing.
    struct Echo {
        name: MethodName,
        fail: bool,
    }

    impl Echo {
        fn new(fail: bool) -> Self {
            Self {
                name: MethodName::new("Echo.call"),
                fail,
            }
        }
    }

    impl StoreOp for Echo {
        type Args = String;
        type Output = String;

        fn name(&self) -> &MethodName {
            &self.name
        }

        fn invoke<B: KvBackend>(&self, _backend: &B, args: String) -> Result<String> {
            if self.fail {
                return Err(Error::InvalidInput("forced failure".to_string()));
            }
            Ok(args)
        }
    }

    fn counter_value(backend: &MemoryBackend, name: &MethodName) -> i64 {
        backend
            .get(name.counter_key())
            .unwrap()
            .map_or(0, |bytes| {
                String::from_utf8(bytes).unwrap().parse().unwrap()
            })
    }

    #[test]
    fn test_counter_tracks_calls() {
        let backend = MemoryBackend::new();
        let op = Counted::new(Echo::new(false));

        for _ in 0..3 {
            op.invoke(&backend, "x".to_string()).unwrap();
        }
        assert_eq!(counter_value(&backend, op.name()), 3);
    }

    #[test]
    fn test_counter_absent_before_first_call() {
        let backend = MemoryBackend::new();
        let op = Counted::new(Echo::new(false));
        assert_eq!(counter_value(&backend, op.name()), 0);
    }

    #[test]
    fn test_failed_call_does_not_count() {
        let backend = MemoryBackend::new();
        let op = Counted::new(Echo::new(true));

        assert!(op.invoke(&backend, "x".to_string()).is_err());
        assert_eq!(counter_value(&backend, op.name()), 0);
    }

    #[test]
    fn test_result_passes_through() {
        let backend = MemoryBackend::new();
        let op = Counted::new(Echo::new(false));
        let out = op.invoke(&backend, "hello".to_string()).unwrap();
        assert_eq!(out, "hello");
    }
}
