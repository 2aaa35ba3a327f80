//! Check implementations by kind.

use crate::{
    Check, CheckKind,
    checks::{DerivativesCheck, UndefsCheck},
};

/// Maps each concrete [`CheckKind`] to the check that implements it.
pub struct Registry {
    checks: Vec<Box<dyn Check>>,
}

impl Registry {
    /// A registry holding every built-in check.
    pub fn builtin() -> Self {
        Self {
            checks: vec![Box::new(DerivativesCheck), Box::new(UndefsCheck)],
        }
    }

    /// A registry with no checks.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Install a check, replacing any check registered for the same kind.
    ///
    /// # Panics
    ///
    /// Panics if the check claims to implement a meta kind.
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        let kind = check.kind();
        assert!(!kind.is_meta(), "'{}' cannot be implemented by a check", kind);
        self.checks.retain(|c| c.kind() != kind);
        self.checks.push(Box::new(check));
        self
    }

    /// The check registered for `kind`.
    pub fn get(&self, kind: CheckKind) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|c| c.kind() == kind)
            .map(|c| c.as_ref())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
