//! Call history read-back and replay rendering.

use crate::cache::Cache;
use crate::models::MethodName;
use crate::storage::KvBackend;
use crate::Result;
use std::io::Write;

/// Recorded call history for one instrumented method.
///
/// Holds the full input and output logs in append order. The two logs
/// normally have equal length; a crash between the input append and the
/// output append leaves a trailing unmatched input, which [`calls`] drops
/// from pairing.
///
/// [`calls`]: CallHistory::calls
#[derive(Debug, Clone)]
pub struct CallHistory {
    method: MethodName,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl CallHistory {
    /// Builds a history from raw log contents.
    #[must_use]
    pub const fn new(method: MethodName, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self {
            method,
            inputs,
            outputs,
        }
    }

    /// The method this history belongs to.
    #[must_use]
    pub const fn method(&self) -> &MethodName {
        &self.method
    }

    /// Serialized arguments, one entry per call.
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Serialized results, one entry per call.
    #[must_use]
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Number of recorded calls, as witnessed by the input log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether any calls were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Pairs the i-th input with the i-th output, stopping at the shorter
    /// log.
    pub fn calls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .zip(self.outputs.iter())
            .map(|(input, output)| (input.as_str(), output.as_str()))
    }
}

/// Renders a call history for display.
///
/// Produces a header stating the call count followed by one
/// `method(input) -> output` line per paired call.
#[must_use]
pub fn render(history: &CallHistory) -> String {
    let method = history.method();
    let mut out = format!("{} was called {} times:\n", method, history.len());
    for (input, output) in history.calls() {
        out.push_str(&format!("{method}({input}) -> {output}\n"));
    }
    out
}

/// Writes the rendered history for `method` to `writer`.
///
/// # Errors
///
/// Returns an error if the history cannot be read from the backend or the
/// writer fails.
pub fn replay_to<B: KvBackend, W: Write>(
    writer: &mut W,
    cache: &Cache<B>,
    method: &MethodName,
) -> Result<()> {
    let history = cache.call_history(method)?;
    writer
        .write_all(render(&history).as_bytes())
        .map_err(|e| crate::Error::OperationFailed {
            operation: "replay_write".to_string(),
            cause: e.to_string(),
        })
}

/// Prints the rendered history for `method` to stdout.
///
/// # Errors
///
/// Returns an error if the history cannot be read from the backend.
#[allow(clippy::print_stdout)] // replay is a display utility
pub fn replay<B: KvBackend>(cache: &Cache<B>, method: &MethodName) -> Result<()> {
    let history = cache.call_history(method)?;
    print!("{}", render(&history));
    Ok(())
}
