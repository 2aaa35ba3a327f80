//! Diagnostic consumers.
//!
//! A [`Consumer`] receives every diagnostic the moment it is produced. It
//! renders, it does not decide: counting lives in [`Outcome`](crate::Outcome).

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

/// Receiver of diagnostics from any stage of a run.
pub trait Consumer {
    /// Handle a single diagnostic. Must not panic on any input.
    fn emit(&mut self, diagnostic: &Diagnostic);
}

/// Collects diagnostics in memory.
impl Consumer for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Renders diagnostics as text to a writer.
///
/// ```text
/// error[derivatives]: implicit derivative in OpDPdx ...
///   --> instruction 12 (word 88)
///   = help: ...
/// ```
///
/// Errors writing to the underlying stream are dropped, since rendering
/// also happens on error paths.
pub struct StreamConsumer<W> {
    writer: W,
}

impl<W: Write> StreamConsumer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the consumer and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let message = diagnostic.message.trim_end();
        match (diagnostic.severity, diagnostic.origin.as_deref()) {
            (Severity::Info, _) => writeln!(self.writer, "{}", message)?,
            (severity, Some(origin)) => {
                writeln!(self.writer, "{}[{}]: {}", severity, origin, message)?
            }
            (severity, None) => writeln!(self.writer, "{}: {}", severity, message)?,
        }
        if let Some(loc) = &diagnostic.location {
            writeln!(self.writer, "  --> {}", loc)?;
        }
        if let Some(help) = &diagnostic.help {
            writeln!(self.writer, "  = help: {}", help)?;
        }
        self.writer.flush()
    }
}

impl StreamConsumer<io::Stderr> {
    /// A consumer writing to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Consumer for StreamConsumer<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = self.render(diagnostic);
    }
}
