//! Check for uses of `OpUndef` values.

use std::collections::HashSet;

use eyre::eyre;
use spvlint_core::{Diagnostic, Severity};
use spvlint_module::{Instruction, Module, op};

use crate::{Check, CheckKind, Findings};

/// Reports instructions that consume the result of an `OpUndef`.
///
/// Using an undefined value as a pointer, branch condition or switch selector
/// is an error; storing, returning or passing it along is a warning.
pub struct UndefsCheck;

impl Check for UndefsCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Undefs
    }

    fn description(&self) -> &'static str {
        "Check uses of undefined values"
    }

    fn analyze<'m>(&self, module: &'m Module) -> Findings<'m> {
        let mut undefs = HashSet::new();
        for inst in module.instructions_with(op::UNDEF) {
            match inst.operand(1) {
                Some(id) => {
                    undefs.insert(id);
                }
                None => {
                    return Box::new(std::iter::once(Err(eyre!(
                        "OpUndef at word {} has no result id",
                        inst.offset()
                    ))));
                }
            }
        }

        if undefs.is_empty() {
            return Box::new(std::iter::empty());
        }

        Box::new(
            module
                .instructions()
                .iter()
                .flat_map(move |inst| undef_uses(inst, &undefs))
                .map(Ok),
        )
    }
}

/// How an instruction consumes one of its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Use {
    Pointer,
    Condition,
    Selector,
    Stored,
    Returned,
    Argument,
}

impl Use {
    fn severity(self) -> Severity {
        match self {
            Use::Pointer | Use::Condition | Use::Selector => Severity::Error,
            Use::Stored | Use::Returned | Use::Argument => Severity::Warning,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Use::Pointer => "as a pointer",
            Use::Condition => "as a branch condition",
            Use::Selector => "as a switch selector",
            Use::Stored => "as the stored value",
            Use::Returned => "as a return value",
            Use::Argument => "as a call argument",
        }
    }
}

/// Operand positions of `inst` that are read as values.
fn value_operands(inst: &Instruction) -> Vec<(usize, Use)> {
    match inst.opcode() {
        op::LOAD => vec![(2, Use::Pointer)],
        op::STORE => vec![(0, Use::Pointer), (1, Use::Stored)],
        op::BRANCH_CONDITIONAL => vec![(0, Use::Condition)],
        op::SWITCH => vec![(0, Use::Selector)],
        op::RETURN_VALUE => vec![(0, Use::Returned)],
        op::FUNCTION_CALL => (3..inst.operands().len())
            .map(|i| (i, Use::Argument))
            .collect(),
        _ => Vec::new(),
    }
}

fn undef_uses(inst: &Instruction, undefs: &HashSet<u32>) -> Vec<Diagnostic> {
    value_operands(inst)
        .into_iter()
        .filter_map(|(index, usage)| {
            let id = inst.operand(index)?;
            if !undefs.contains(&id) {
                return None;
            }
            let message = format!(
                "undefined value %{} used {} in {}",
                id,
                usage.describe(),
                inst.opcode_name()
            );
            Some(Diagnostic::new(usage.severity(), message).at(inst.location()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use spvlint_module::testing::ModuleBuilder;

    use super::*;

    fn diagnostics(module: &Module) -> Vec<Diagnostic> {
        UndefsCheck
            .analyze(module)
            .map(|r| r.expect("check should complete"))
            .collect()
    }

    #[test]
    fn test_no_undefs() {
        let module = ModuleBuilder::new()
            .inst(op::STORE, &[10, 11])
            .inst(op::RETURN_VALUE, &[11])
            .build();

        assert!(diagnostics(&module).is_empty());
    }

    #[test]
    fn test_stored_undef_is_warning() {
        let module = ModuleBuilder::new()
            .undef(7)
            .inst(op::STORE, &[10, 7])
            .build();

        let found = diagnostics(&module);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Warning);
        assert_eq!(
            found[0].message,
            "undefined value %7 used as the stored value in OpStore"
        );
        assert_eq!(found[0].location, Some(module.instructions()[1].location()));
    }

    #[test]
    fn test_control_flow_and_pointer_uses_are_errors() {
        let module = ModuleBuilder::new()
            .undef(7)
            .undef(8)
            .inst(op::BRANCH_CONDITIONAL, &[7, 20, 21])
            .inst(op::SWITCH, &[7, 22])
            .inst(op::LOAD, &[1, 30, 8])
            .build();

        let found = diagnostics(&module);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|d| d.severity.is_error()));
        assert!(found[0].message.contains("branch condition"));
        assert!(found[1].message.contains("switch selector"));
        assert!(found[2].message.contains("%8 used as a pointer in OpLoad"));
    }

    #[test]
    fn test_call_arguments() {
        let module = ModuleBuilder::new()
            .undef(7)
            .call(20, 5, &[6, 7, 7])
            .build();

        let found = diagnostics(&module);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|d| d.message.contains("as a call argument")));
    }

    #[test]
    fn test_result_and_type_positions_ignored() {
        // %7 appears as the result id of the call and as the loaded result,
        // neither of which reads the value.
        let module = ModuleBuilder::new()
            .undef(7)
            .call(7, 5, &[])
            .inst(op::LOAD, &[1, 7, 10])
            .build();

        assert!(diagnostics(&module).is_empty());
    }

    #[test]
    fn test_malformed_undef_fails() {
        let module = ModuleBuilder::new().inst(op::UNDEF, &[1]).build();

        let results: Vec<_> = UndefsCheck.analyze(&module).collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
