//! Check for implicit derivatives outside of derivative-capable stages.

use std::collections::{HashMap, HashSet};

use eyre::{Result, bail, eyre};
use spvlint_core::Diagnostic;
use spvlint_module::{Module, op};

use crate::{Check, CheckKind, Findings};

/// Errors on implicit-derivative instructions reachable from an entry point
/// whose execution model cannot compute derivatives.
///
/// Fragment entry points always can. Compute-like entry points (GLCompute,
/// Task, Mesh) can when they declare a derivative group execution mode.
pub struct DerivativesCheck;

impl Check for DerivativesCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Derivatives
    }

    fn description(&self) -> &'static str {
        "Check implicit derivatives"
    }

    fn analyze<'m>(&self, module: &'m Module) -> Findings<'m> {
        let graph = match CallGraph::build(module) {
            Ok(graph) => graph,
            Err(err) => return Box::new(std::iter::once(Err(err))),
        };
        let entry_points = graph.entry_points.len();
        Box::new(
            (0..entry_points)
                .flat_map(move |i| graph.violations(module, i))
                .map(Ok),
        )
    }
}

fn is_implicit_derivative(opcode: u16) -> bool {
    matches!(
        opcode,
        op::IMAGE_SAMPLE_IMPLICIT_LOD
            | op::IMAGE_SAMPLE_DREF_IMPLICIT_LOD
            | op::IMAGE_SAMPLE_PROJ_IMPLICIT_LOD
            | op::IMAGE_SAMPLE_PROJ_DREF_IMPLICIT_LOD
            | op::IMAGE_SPARSE_SAMPLE_IMPLICIT_LOD
            | op::IMAGE_SPARSE_SAMPLE_DREF_IMPLICIT_LOD
            | op::IMAGE_SPARSE_SAMPLE_PROJ_IMPLICIT_LOD
            | op::IMAGE_SPARSE_SAMPLE_PROJ_DREF_IMPLICIT_LOD
            | op::IMAGE_QUERY_LOD
            | op::DPDX..=op::FWIDTH_COARSE
    )
}

struct EntryPoint {
    model: u32,
    function: u32,
    name: String,
}

#[derive(Default)]
struct Function {
    id: u32,
    callees: Vec<u32>,
    /// Instruction indices of implicit-derivative instructions.
    derivatives: Vec<usize>,
}

struct CallGraph {
    /// Functions in module order.
    functions: Vec<Function>,
    by_id: HashMap<u32, usize>,
    entry_points: Vec<EntryPoint>,
    /// Entry point functions declaring a derivative group execution mode.
    derivative_groups: HashSet<u32>,
}

impl CallGraph {
    fn build(module: &Module) -> Result<Self> {
        let mut functions = Vec::new();
        let mut entry_points = Vec::new();
        let mut derivative_groups = HashSet::new();
        let mut current: Option<Function> = None;

        for inst in module.instructions() {
            match inst.opcode() {
                op::ENTRY_POINT => {
                    let (Some(model), Some(function)) = (inst.operand(0), inst.operand(1)) else {
                        bail!("OpEntryPoint at word {} has too few operands", inst.offset());
                    };
                    let name = inst.string_at(2).map(|(s, _)| s).unwrap_or_default();
                    entry_points.push(EntryPoint {
                        model,
                        function,
                        name,
                    });
                }
                op::EXECUTION_MODE => {
                    if let (Some(function), Some(mode)) = (inst.operand(0), inst.operand(1)) {
                        if matches!(
                            mode,
                            op::mode::DERIVATIVE_GROUP_QUADS | op::mode::DERIVATIVE_GROUP_LINEAR
                        ) {
                            derivative_groups.insert(function);
                        }
                    }
                }
                op::FUNCTION => {
                    let id = inst.operand(1).ok_or_else(|| {
                        eyre!("OpFunction at word {} has no result id", inst.offset())
                    })?;
                    if let Some(open) = &current {
                        bail!(
                            "function %{} begins at word {} before function %{} ends",
                            id,
                            inst.offset(),
                            open.id
                        );
                    }
                    current = Some(Function {
                        id,
                        ..Function::default()
                    });
                }
                op::FUNCTION_END => match current.take() {
                    Some(function) => functions.push(function),
                    None => bail!(
                        "OpFunctionEnd at word {} has no matching OpFunction",
                        inst.offset()
                    ),
                },
                op::FUNCTION_CALL => {
                    if let (Some(function), Some(callee)) = (current.as_mut(), inst.operand(2)) {
                        function.callees.push(callee);
                    }
                }
                opcode if is_implicit_derivative(opcode) => {
                    if let Some(function) = current.as_mut() {
                        function.derivatives.push(inst.index());
                    }
                }
                _ => {}
            }
        }

        if let Some(open) = current {
            bail!("function %{} is never closed by OpFunctionEnd", open.id);
        }

        let by_id: HashMap<u32, usize> = functions
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id, i))
            .collect();

        for entry in &entry_points {
            if !by_id.contains_key(&entry.function) {
                bail!(
                    "entry point '{}' names undefined function %{}",
                    entry.name,
                    entry.function
                );
            }
        }

        Ok(Self {
            functions,
            by_id,
            entry_points,
            derivative_groups,
        })
    }

    fn allows_derivatives(&self, entry: &EntryPoint) -> bool {
        match entry.model {
            op::model::FRAGMENT => true,
            op::model::GL_COMPUTE
            | op::model::TASK_NV
            | op::model::MESH_NV
            | op::model::TASK_EXT
            | op::model::MESH_EXT => self.derivative_groups.contains(&entry.function),
            _ => false,
        }
    }

    /// Functions reachable from `root` through static calls, `root` included.
    /// Calls to functions not defined in the module are ignored.
    fn reachable(&self, root: u32) -> HashSet<u32> {
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(&index) = self.by_id.get(&id) else {
                continue;
            };
            if seen.insert(id) {
                stack.extend(self.functions[index].callees.iter().copied());
            }
        }
        seen
    }

    fn violations(&self, module: &Module, entry_index: usize) -> Vec<Diagnostic> {
        let entry = &self.entry_points[entry_index];
        if self.allows_derivatives(entry) {
            return Vec::new();
        }

        let reachable = self.reachable(entry.function);
        let instructions = module.instructions();
        let model = op::model::name(entry.model);

        let mut found = Vec::new();
        for function in self.functions.iter().filter(|f| reachable.contains(&f.id)) {
            for &index in &function.derivatives {
                let inst = &instructions[index];
                let via = if function.id == entry.function {
                    String::new()
                } else {
                    format!(" through {}", function_label(module, function.id))
                };
                found.push(
                    Diagnostic::error(format!(
                        "{} needs implicit derivatives but is reachable from {} entry point '{}'{}",
                        inst.opcode_name(),
                        model,
                        entry.name,
                        via
                    ))
                    .at(inst.location())
                    .help(
                        "implicit derivatives are only defined in the Fragment execution model, \
                         or in compute-like models that declare a DerivativeGroup execution mode",
                    ),
                );
            }
        }
        found
    }
}

fn function_label(module: &Module, id: u32) -> String {
    match module.name_of(id) {
        Some(name) => format!("function '{}'", name),
        None => format!("function %{}", id),
    }
}
