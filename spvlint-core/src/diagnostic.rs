//! Diagnostic types shared by the loader, the scheduler and every check.
//!
//! A [`Diagnostic`] is created once and never mutated after it has been
//! handed to a [`Consumer`](crate::Consumer).

use std::fmt;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message about the module or the run.
    Info,
    /// A suspicious construct that does not make the run fail.
    Warning,
    /// A defect, usage error or load error. Any error makes the run fail.
    Error,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Position of a finding inside the decoded instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Zero-based index of the instruction, not counting the header.
    pub instruction: usize,
    /// Word offset of the instruction from the start of the module.
    pub word: usize,
}

impl Location {
    pub fn new(instruction: usize, word: usize) -> Self {
        Self { instruction, word }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instruction {} (word {})", self.instruction, self.word)
    }
}

/// A severity-tagged, optionally located message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The diagnostic message.
    pub message: String,
    /// Where in the module the finding applies, if anywhere.
    pub location: Option<Location>,
    /// What produced the diagnostic (a check name or an error code).
    pub origin: Option<String>,
    /// Suggestion on how to address the problem.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic at the given severity.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            location: None,
            origin: None,
            help: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a new info diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Build an error diagnostic from any [`miette::Diagnostic`], keeping its
    /// code as the origin and its help text. Source errors are appended to
    /// the message.
    pub fn from_report(report: &dyn miette::Diagnostic) -> Self {
        let mut message = report.to_string();
        let mut source = report.source();
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }

        let mut diagnostic = Self::error(message);
        diagnostic.origin = report.code().map(|code| code.to_string());
        diagnostic.help = report.help().map(|help| help.to_string());
        diagnostic
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Record what produced this diagnostic.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Attach a help message.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
