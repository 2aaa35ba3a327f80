//! Selectable check kinds and their expansion.

use std::fmt;

/// A selectable analysis.
///
/// `All` is a selector only: it expands to every concrete kind and is never
/// scheduled itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Uniform-derivative analysis.
    Derivatives,
    /// Undefined-value-use analysis.
    Undefs,
    /// Every concrete check.
    All,
}

impl CheckKind {
    /// Every concrete kind, in the order `All` expands to.
    pub const CONCRETE: [CheckKind; 2] = [CheckKind::Derivatives, CheckKind::Undefs];

    /// The concrete checks this kind denotes.
    pub fn expand(self) -> &'static [CheckKind] {
        match self {
            CheckKind::Derivatives => &[CheckKind::Derivatives],
            CheckKind::Undefs => &[CheckKind::Undefs],
            CheckKind::All => &Self::CONCRETE,
        }
    }

    /// Returns true for selectors that stand for several checks.
    pub fn is_meta(self) -> bool {
        matches!(self, CheckKind::All)
    }

    /// Short name, used as the origin of the check's diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Derivatives => "derivatives",
            CheckKind::Undefs => "undefs",
            CheckKind::All => "all",
        }
    }

    /// The command-line flag selecting this kind.
    pub fn flag(self) -> &'static str {
        match self {
            CheckKind::Derivatives => "--check-derivatives",
            CheckKind::Undefs => "--check-undefs",
            CheckKind::All => "--check-all",
        }
    }

    /// The kind selected by a command-line flag, if the flag selects one.
    pub fn from_flag(flag: &str) -> Option<Self> {
        [CheckKind::All, CheckKind::Derivatives, CheckKind::Undefs]
            .into_iter()
            .find(|kind| kind.flag() == flag)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expand every requested kind and drop repeats, keeping first occurrences.
pub fn resolve(requested: impl IntoIterator<Item = CheckKind>) -> Vec<CheckKind> {
    let mut resolved: Vec<CheckKind> = Vec::new();
    for kind in requested.into_iter().flat_map(CheckKind::expand) {
        if !resolved.contains(kind) {
            resolved.push(*kind);
        }
    }
    resolved
}
