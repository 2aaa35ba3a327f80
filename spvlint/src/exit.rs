use std::process::ExitCode;

/// How a process invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The module was linted and no error was reported.
    Success,
    /// The module could not be loaded, or linting reported an error.
    Failure,
    /// Nothing ran: help or version was printed, or the arguments were invalid.
    NotRun,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
            Exit::NotRun => 2,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit.code())
    }
}
