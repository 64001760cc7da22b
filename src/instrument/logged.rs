//! Call history logging wrapper.

use super::StoreOp;
use crate::storage::KvBackend;
use crate::Result;
use std::fmt::Display;

/// Wrapper that records the arguments and result of every invocation.
///
/// Arguments are appended to the operation's input log before the inner
/// call, the result to its output log after. Both logs are append-only
/// backend lists in strict call order. If the inner call fails, the input
/// entry remains without a matching output entry; readers pair the logs
/// up to the shorter length.
pub struct Logged<Op> {
    inner: Op,
}

impl<Op> Logged<Op> {
    /// Wraps an operation with input/output logging.
    pub const fn new(inner: Op) -> Self {
        Self { inner }
    }
}

impl<Op> StoreOp for Logged<Op>
where
    Op: StoreOp,
    Op::Args: Display,
    Op::Output: Display,
{
    type Args = Op::Args;
    type Output = Op::Output;

    fn name(&self) -> &crate::models::MethodName {
        self.inner.name()
    }

    fn invoke<B: KvBackend>(&self, backend: &B, args: Self::Args) -> Result<Self::Output> {
        let name = self.inner.name();
        backend.list_append(&name.inputs_key(), &args.to_string())?;
        let output = self.inner.invoke(backend, args)?;
        backend.list_append(&name.outputs_key(), &output.to_string())?;
        tracing::debug!(method = %name, "call logged");
        Ok(output)
    }
}
