//! Check scheduling for the spvlint SPIR-V linter.
//!
//! This crate turns a requested set of [`CheckKind`]s into a schedule and
//! runs it over a decoded module:
//!
//! - [`CheckKind`] enumerates the selectable checks, including the `All`
//!   selector, and [`resolve`] expands and deduplicates a request
//! - [`Check`] is the capability every analysis implements
//! - [`Registry`] maps concrete kinds to implementations
//! - [`Linter`] holds the schedule and runs it, streaming diagnostics to a
//!   [`Consumer`](spvlint_core::Consumer)
//!
//! # Example
//!
//! ```ignore
//! use spvlint_linter::{CheckKind, Linter};
//!
//! let mut linter = Linter::new();
//! linter.schedule_checks(vec![CheckKind::Undefs]);
//! let outcome = linter.run(&module, &mut consumer);
//! ```

mod check;
pub mod checks;
mod kind;
mod linter;
mod registry;

pub use check::{Check, Findings};
pub use kind::{CheckKind, resolve};
pub use linter::Linter;
pub use registry::Registry;
