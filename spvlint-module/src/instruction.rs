use spvlint_core::Location;

use crate::op;

/// One decoded instruction.
///
/// Operands are kept as raw words; the meaning of each word depends on the
/// opcode and is left to whoever inspects the instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    opcode: u16,
    operands: Vec<u32>,
    index: usize,
    offset: usize,
}

impl Instruction {
    pub(crate) fn new(opcode: u16, operands: Vec<u32>, index: usize, offset: usize) -> Self {
        Self {
            opcode,
            operands,
            index,
            offset,
        }
    }

    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    /// The opcode's name, or `Op<number>` for opcodes the linter does not know.
    pub fn opcode_name(&self) -> String {
        op::name(self.opcode)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Op{}", self.opcode))
    }

    /// All words after the leading opcode/word-count word.
    pub fn operands(&self) -> &[u32] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<u32> {
        self.operands.get(index).copied()
    }

    /// Index of this instruction in the module, not counting the header.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Word offset of this instruction from the start of the module.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn location(&self) -> Location {
        Location::new(self.index, self.offset)
    }

    /// Decode the literal string starting at operand `index`.
    ///
    /// Returns the string and the number of operand words it occupies, or
    /// `None` if the operands end before the terminating NUL.
    pub fn string_at(&self, index: usize) -> Option<(String, usize)> {
        let mut bytes = Vec::new();
        for (used, word) in self.operands.get(index..)?.iter().enumerate() {
            for byte in word.to_le_bytes() {
                if byte == 0 {
                    return Some((String::from_utf8_lossy(&bytes).into_owned(), used + 1));
                }
                bytes.push(byte);
            }
        }
        None
    }
}

/// Pack a string into NUL-terminated little-endian words.
pub fn encode_string(s: &str) -> Vec<u32> {
    let mut bytes = s.as_bytes().to_vec();
    bytes.push(0);
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
