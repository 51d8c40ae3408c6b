//! Result type pairing an operation's output with its trace.

use mini_aes_core::{Error, Trace};

/// Output of an operation together with every trace line it produced.
///
/// The trace is kept on failure as well, up to the point where the
/// operation stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traced<T> {
    /// The result, or the error that aborted the operation.
    pub output: Result<T, Error>,
    /// Trace lines gathered while running.
    pub trace: Trace,
}

impl<T> Traced<T> {
    /// Wraps a finished result, appending the error to the trace on failure.
    pub fn finish(output: Result<T, Error>, mut trace: Trace) -> Self {
        if let Err(err) = &output {
            trace.record(format_args!("error: {err}"));
        }
        Self { output, trace }
    }

    /// Returns the value if the operation succeeded.
    pub fn value(&self) -> Option<&T> {
        self.output.as_ref().ok()
    }

    /// Returns the error if the operation failed.
    pub fn error(&self) -> Option<&Error> {
        self.output.as_ref().err()
    }

    /// Returns `true` on success.
    pub fn is_ok(&self) -> bool {
        self.output.is_ok()
    }

    /// Discards the trace.
    pub fn into_result(self) -> Result<T, Error> {
        self.output
    }

    /// Splits into result and trace.
    pub fn into_parts(self) -> (Result<T, Error>, Trace) {
        (self.output, self.trace)
    }
}
