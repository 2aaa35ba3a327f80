//! SPIR-V module loading for spvlint.
//!
//! Turns a stream of bytes into a read-only [`Module`]: a validated header
//! plus a framed instruction list. Operand meaning is not decoded here;
//! checks look at the words they care about.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod input;
mod instruction;
mod module;
pub mod op;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod version;

pub use error::{Error, Result};
pub use input::Input;
pub use instruction::{Instruction, encode_string};
pub use module::{HEADER_WORDS, Header, Module};
pub use version::SpirvVersion;
