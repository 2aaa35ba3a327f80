use std::path::Path;

use tracing::{debug, trace};

use crate::{Error, Instruction, Result, SpirvVersion, op};

/// Number of words in the module header.
pub const HEADER_WORDS: usize = 5;

/// The fixed module header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: SpirvVersion,
    /// Registered generator magic (tool vendor and version).
    pub generator: u32,
    /// All result ids in the module are below this bound.
    pub bound: u32,
    pub schema: u32,
}

/// A decoded SPIR-V module.
///
/// The module is read-only once loaded; checks only ever borrow it.
#[derive(Debug, Clone)]
pub struct Module {
    header: Header,
    instructions: Vec<Instruction>,
}

impl Module {
    /// Load a module from a file on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Decode a module from raw bytes of either endianness.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(Box::new(Error::Truncated { len: bytes.len() }));
        }

        let mut words: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        if words.first() == Some(&op::MAGIC.swap_bytes()) {
            debug!("module is big-endian, swapping words");
            for word in &mut words {
                *word = word.swap_bytes();
            }
        }

        Self::from_words(&words)
    }

    /// Decode a module from host-order words.
    pub fn from_words(words: &[u32]) -> Result<Self> {
        if words.len() < HEADER_WORDS {
            return Err(Box::new(Error::MissingHeader { words: words.len() }));
        }
        if words[0] != op::MAGIC {
            return Err(Box::new(Error::BadMagic { found: words[0] }));
        }

        let header = Header {
            version: SpirvVersion::from_word(words[1]),
            generator: words[2],
            bound: words[3],
            schema: words[4],
        };

        let mut instructions = Vec::new();
        let mut offset = HEADER_WORDS;
        while offset < words.len() {
            let first = words[offset];
            let count = (first >> 16) as usize;
            let opcode = (first & 0xffff) as u16;
            let remaining = words.len() - offset;

            if count == 0 {
                return Err(Box::new(Error::ZeroWordCount { offset }));
            }
            if count > remaining {
                return Err(Box::new(Error::Overrun {
                    offset,
                    opcode,
                    count,
                    remaining,
                }));
            }

            let operands = words[offset + 1..offset + count].to_vec();
            instructions.push(Instruction::new(
                opcode,
                operands,
                instructions.len(),
                offset,
            ));
            offset += count;
        }

        trace!(instructions = instructions.len(), "framed instructions");

        Ok(Self {
            header,
            instructions,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over the instructions with the given opcode.
    pub fn instructions_with(&self, opcode: u16) -> impl Iterator<Item = &Instruction> {
        self.instructions
            .iter()
            .filter(move |inst| inst.opcode() == opcode)
    }

    /// The debug name attached to `id` with `OpName`, if any.
    pub fn name_of(&self, id: u32) -> Option<String> {
        self.instructions_with(op::NAME)
            .find(|inst| inst.operand(0) == Some(id))
            .and_then(|inst| inst.string_at(1))
            .map(|(name, _)| name)
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }
}
