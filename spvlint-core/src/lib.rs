//! Core diagnostic types for the spvlint SPIR-V linter.
//!
//! Every stage of a run (argument parsing, module loading, checks) reports
//! through the same [`Diagnostic`] type and [`Consumer`] trait, and the
//! caller keeps score with an explicit [`Outcome`].

mod consumer;
mod diagnostic;
mod outcome;

pub use consumer::{Consumer, StreamConsumer};
pub use diagnostic::{Diagnostic, Location, Severity};
pub use outcome::Outcome;
