//! Aggregate outcome of a run.

use crate::{Consumer, Diagnostic, Severity};

/// Per-severity tally of the diagnostics seen so far.
///
/// The tally is threaded explicitly by the caller: the scheduler returns one
/// per run, and the driver merges it with the diagnostics it emitted itself
/// while parsing arguments and loading the module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    errors: usize,
    warnings: usize,
    infos: usize,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a diagnostic without rendering it.
    pub fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.infos += 1,
        }
    }

    /// Count a diagnostic and forward it to `consumer`.
    pub fn emit(&mut self, consumer: &mut dyn Consumer, diagnostic: Diagnostic) {
        self.record(&diagnostic);
        consumer.emit(&diagnostic);
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: Outcome) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.infos += other.infos;
    }

    /// Check if any error diagnostic has been recorded.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn info_count(&self) -> usize {
        self.infos
    }
}
