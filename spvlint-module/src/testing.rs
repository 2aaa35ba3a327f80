//! Helpers for assembling small modules in tests.
//!
//! Enabled by the `testing` feature.

use crate::{Module, SpirvVersion, encode_string, op};

/// Assembles a module word by word.
///
/// ```ignore
/// let module = ModuleBuilder::new()
///     .entry_point(op::model::VERTEX, 4, "main")
///     .function(4)
///     .inst(op::DPDX, &[1, 10, 9])
///     .function_end()
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    version: SpirvVersion,
    bound: u32,
    body: Vec<u32>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self {
            version: SpirvVersion::new(1, 5),
            bound: 64,
            body: Vec::new(),
        }
    }

    /// Append an instruction with the given operands.
    pub fn inst(mut self, opcode: u16, operands: &[u32]) -> Self {
        let count = operands.len() as u32 + 1;
        self.body.push((count << 16) | u32::from(opcode));
        self.body.extend_from_slice(operands);
        self
    }

    /// `OpEntryPoint <model> %function "name"`
    pub fn entry_point(self, model: u32, function: u32, name: &str) -> Self {
        let mut operands = vec![model, function];
        operands.extend(encode_string(name));
        self.inst(op::ENTRY_POINT, &operands)
    }

    /// `OpExecutionMode %function <mode>`
    pub fn execution_mode(self, function: u32, mode: u32) -> Self {
        self.inst(op::EXECUTION_MODE, &[function, mode])
    }

    /// `OpName %id "name"`
    pub fn name(self, id: u32, name: &str) -> Self {
        let mut operands = vec![id];
        operands.extend(encode_string(name));
        self.inst(op::NAME, &operands)
    }

    /// `%id = OpUndef %ty` with a fixed result type id of 1.
    pub fn undef(self, id: u32) -> Self {
        self.inst(op::UNDEF, &[1, id])
    }

    /// `%id = OpFunction %void None %fn_ty` with fixed type ids.
    pub fn function(self, id: u32) -> Self {
        self.inst(op::FUNCTION, &[2, id, 0, 3])
    }

    pub fn function_end(self) -> Self {
        self.inst(op::FUNCTION_END, &[])
    }

    /// `%result = OpFunctionCall %void %callee args...`
    pub fn call(self, result: u32, callee: u32, args: &[u32]) -> Self {
        let mut operands = vec![2, result, callee];
        operands.extend_from_slice(args);
        self.inst(op::FUNCTION_CALL, &operands)
    }

    /// All words of the module, header included.
    pub fn words(&self) -> Vec<u32> {
        let mut words = vec![op::MAGIC, self.version.to_word(), 0, self.bound, 0];
        words.extend_from_slice(&self.body);
        words
    }

    /// The module as little-endian bytes, as it would sit in a `.spv` file.
    pub fn bytes(&self) -> Vec<u8> {
        self.words().iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// Decode the assembled words.
    ///
    /// # Panics
    ///
    /// Panics if the assembled words do not frame as a module.
    pub fn build(&self) -> Module {
        Module::from_words(&self.words()).expect("assembled module should decode")
    }
}

impl Default for ModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
