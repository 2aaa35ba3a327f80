use std::{ffi::OsStr, fmt, io::Read, path::PathBuf};

use crate::{Error, Module, Result};

/// Where the module bytes come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Input {
    /// Standard input, selected by `-` or by giving no input at all.
    #[default]
    Stdin,
    /// A file on disk.
    Path(PathBuf),
}

impl Input {
    /// Interpret a command-line token; `-` means standard input.
    pub fn from_arg(arg: impl AsRef<OsStr>) -> Self {
        let arg = arg.as_ref();
        if arg == "-" {
            Input::Stdin
        } else {
            Input::Path(PathBuf::from(arg))
        }
    }

    /// Load the module, taking standard input from `stdin`.
    pub fn load(&self, mut stdin: impl Read) -> Result<Module> {
        match self {
            Input::Path(path) => Module::open(path),
            Input::Stdin => {
                let mut bytes = Vec::new();
                stdin
                    .read_to_end(&mut bytes)
                    .map_err(|source| Box::new(Error::Stdin { source }))?;
                Module::from_bytes(&bytes)
            }
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "<stdin>"),
            Input::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op;

    fn header_bytes() -> Vec<u8> {
        [op::MAGIC, 0x0001_0000, 0, 1, 0]
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect()
    }

    #[test]
    fn test_from_arg() {
        assert_eq!(Input::from_arg("-"), Input::Stdin);
        assert_eq!(
            Input::from_arg("shader.spv"),
            Input::Path(PathBuf::from("shader.spv"))
        );
        assert_eq!(Input::default(), Input::Stdin);
    }

    #[test]
    fn test_display() {
        assert_eq!(Input::Stdin.to_string(), "<stdin>");
        assert_eq!(Input::from_arg("a.spv").to_string(), "a.spv");
    }

    #[test]
    fn test_load_stdin() {
        let bytes = header_bytes();
        let module = Input::Stdin.load(bytes.as_slice()).unwrap();
        assert!(module.is_empty());
    }

    #[test]
    fn test_load_path_ignores_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.spv");
        std::fs::write(&path, header_bytes()).unwrap();

        let module = Input::Path(path).load(&b"not spir-v"[..]).unwrap();
        assert!(module.is_empty());
    }

    #[test]
    fn test_load_missing_path() {
        let err = Input::from_arg("/nonexistent/dir/m.spv")
            .load(std::io::empty())
            .unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
