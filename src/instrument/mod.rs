//! Call instrumentation wrappers.
//!
//! Cross-cutting behaviors are expressed as generic wrapper types around a
//! base operation, composed as a wrapping chain:
//!
//! ```text
//! +---------+     +--------+     +------------+
//! | Counted | --> | Logged | --> | base op    | --> backend write
//! +---------+     +--------+     +------------+
//!      |               |
//!      |               +-- appends args to <name>:inputs before the call,
//!      |                   result to <name>:outputs after it
//!      +-- increments the <name> counter once the logged call returns
//! ```
//!
//! Counter and log state live in the backend itself, keyed by the
//! operation's [`MethodName`], so they survive for the life of the backend
//! namespace and are visible to any reader of that namespace.

mod counted;
mod logged;
mod replay;

pub use counted::Counted;
pub use logged::Logged;
pub use replay::{render, replay, replay_to, CallHistory};

use crate::models::MethodName;
use crate::storage::KvBackend;
use crate::Result;

/// An invocable operation against a key-value backend.
///
/// Implementors carry a stable [`MethodName`] registered at construction
/// time; wrappers derive their counter and log keys from it. The backend
/// is threaded through `invoke` so wrappers can record to the same
/// namespace the operation writes to.
pub trait StoreOp {
    /// Argument type of a single invocation.
    type Args;
    /// Result type of a single invocation.
    type Output;

    /// Stable identity of this operation.
    fn name(&self) -> &MethodName;

    /// Executes the operation against `backend`.
    fn invoke<B: KvBackend>(&self, backend: &B, args: Self::Args) -> Result<Self::Output>;
}
