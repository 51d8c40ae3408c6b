//! Human-readable trace of every intermediate cipher step.

use std::fmt;

/// Append-only log of intermediate values produced by an operation.
///
/// A muted trace accepts the same calls but keeps nothing, which lets hot
/// loops skip the formatting cost without a separate code path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    lines: Vec<String>,
    muted: bool,
}

impl Trace {
    /// Creates an empty, recording trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a trace that discards everything written to it.
    pub fn muted() -> Self {
        Self {
            lines: Vec::new(),
            muted: true,
        }
    }

    /// Returns `true` if lines written to this trace are discarded.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Appends one formatted line.
    ///
    /// Use with `format_args!` so muted traces never allocate.
    pub fn record(&mut self, args: fmt::Arguments<'_>) {
        if !self.muted {
            self.lines.push(args.to_string());
        }
    }

    /// Appends a blank separator line.
    pub fn blank(&mut self) {
        if !self.muted {
            self.lines.push(String::new());
        }
    }

    /// Recorded lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consumes the trace, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl From<Vec<String>> for Trace {
    fn from(lines: Vec<String>) -> Self {
        Self {
            lines,
            muted: false,
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
