//! Diagnostics collected while simulating.

/// Ordered human-readable notes about one branch.
///
/// The core crate has no logger; the runtime forwards these lines to
/// `tracing` at debug level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    lines: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn extend(&mut self, other: &Trace) {
        self.lines.extend(other.lines.iter().cloned());
    }
}
