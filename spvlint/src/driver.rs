//! Ties argument parsing, module loading and the linter together.

use std::{ffi::OsString, io::Read};

use spvlint_core::{Consumer, Diagnostic, Outcome};
use spvlint_linter::{Linter, Registry};
use tracing::debug;

use crate::{
    cli::{self, Parse},
    exit::Exit,
};

/// Run one invocation with the built-in checks.
pub fn run<I, T>(args: I, consumer: &mut dyn Consumer, stdin: impl Read) -> Exit
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    run_with(Registry::builtin(), args, consumer, stdin)
}

/// Run one invocation with the checks in `registry`.
///
/// Every diagnostic, whatever its stage, goes to `consumer`. `stdin` is only
/// read when the input is standard input.
pub fn run_with<I, T>(
    registry: Registry,
    args: I,
    consumer: &mut dyn Consumer,
    stdin: impl Read,
) -> Exit
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut outcome = Outcome::new();

    let invocation = match cli::parse(args, consumer, &mut outcome) {
        Parse::Run(invocation) => invocation,
        Parse::Stop => return Exit::NotRun,
    };

    let mut linter = Linter::with_registry(registry);
    linter.schedule_checks(invocation.checks);

    debug!(input = %invocation.input, "loading module");
    let module = match invocation.input.load(stdin) {
        Ok(module) => module,
        Err(err) => {
            outcome.emit(consumer, Diagnostic::from_report(&*err));
            return Exit::Failure;
        }
    };

    let header = module.header();
    debug!(
        version = %header.version,
        generator = header.generator,
        bound = header.bound,
        instructions = module.len(),
        "module loaded"
    );

    outcome.merge(linter.run(&module, consumer));
    debug!(
        errors = outcome.error_count(),
        warnings = outcome.warning_count(),
        infos = outcome.info_count(),
        "run finished"
    );

    if outcome.has_errors() {
        Exit::Failure
    } else {
        Exit::Success
    }
}
