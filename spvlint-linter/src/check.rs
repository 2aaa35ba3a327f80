//! The check capability trait.

use spvlint_core::Diagnostic;
use spvlint_module::Module;

use crate::CheckKind;

/// The findings of one check over one module.
///
/// Produced lazily and consumed once. An `Err` item means the check could
/// not complete; the scheduler reports it and stops pulling from the check.
pub type Findings<'m> = Box<dyn Iterator<Item = eyre::Result<Diagnostic>> + 'm>;

/// An independent analysis pass over a module.
///
/// Checks only read the module and keep no state between calls, so no check
/// can observe another. That makes the schedule order a presentation
/// concern.
pub trait Check: Send + Sync {
    /// The concrete kind this check implements. Never [`CheckKind::All`].
    fn kind(&self) -> CheckKind;

    /// The name of this check (used as the origin of its diagnostics).
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// A human-readable description of what this check looks for.
    fn description(&self) -> &'static str;

    /// Analyze the module.
    fn analyze<'m>(&self, module: &'m Module) -> Findings<'m>;
}
