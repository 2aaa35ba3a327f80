//! Built-in checks.

mod derivatives;
mod undefs;

pub use derivatives::DerivativesCheck;
pub use undefs::UndefsCheck;
