use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for module loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(spvlint::io),
        help("pass '-' or no input to read the module from standard input")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read the module from standard input")]
    #[diagnostic(code(spvlint::io))]
    Stdin {
        #[source]
        source: std::io::Error,
    },

    #[error("input is {len} bytes long, which is not a whole number of 32-bit words")]
    #[diagnostic(code(spvlint::truncated))]
    Truncated { len: usize },

    #[error("module has {words} word(s), too short to hold a SPIR-V header")]
    #[diagnostic(
        code(spvlint::missing_header),
        help("a SPIR-V module starts with a 5-word header")
    )]
    MissingHeader { words: usize },

    #[error("invalid magic number {found:#010x}")]
    #[diagnostic(
        code(spvlint::bad_magic),
        help("SPIR-V binaries start with 0x07230203; is this a text (.spvasm) file?")
    )]
    BadMagic { found: u32 },

    #[error("instruction at word {offset} has a word count of zero")]
    #[diagnostic(code(spvlint::bad_word_count))]
    ZeroWordCount { offset: usize },

    #[error(
        "instruction at word {offset} (opcode {opcode}) needs {count} words but only {remaining} remain"
    )]
    #[diagnostic(code(spvlint::bad_word_count))]
    Overrun {
        offset: usize,
        opcode: u16,
        count: usize,
        remaining: usize,
    },
}

impl Error {
    /// Create an I/O error for a file path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
