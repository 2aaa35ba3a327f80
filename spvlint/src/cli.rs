//! Command-line definition and flag-to-check mapping.

use std::ffi::OsString;

use clap::{Arg, ArgAction, Command, error::ErrorKind, value_parser};
use spvlint_core::{Consumer, Diagnostic, Outcome};
use spvlint_linter::CheckKind;
use spvlint_module::Input;

/// What a successful parse asks for.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Requested checks in command-line order, repeats and `All` included.
    pub checks: Vec<CheckKind>,
    pub input: Input,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Parse {
    /// Arguments are valid; go load the module and lint it.
    Run(Invocation),
    /// Help or version was printed, or a usage error was reported.
    Stop,
}

/// The `spvlint` command. Options are declared in lexicographical order.
pub fn command() -> Command {
    Command::new("spvlint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lint a SPIR-V binary file.")
        .override_usage("spvlint [options] [<input>]")
        .after_help(
            "The SPIR-V binary is read from <input>. If no file is specified, \
             or if <input> is \"-\", then the binary is read from standard input.\n\n\
             NOTE: The linter is experimental.",
        )
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(check_flag(CheckKind::All, "Run all linter checks."))
        .arg(check_flag(
            CheckKind::Derivatives,
            "Check implicit derivatives.",
        ))
        .arg(check_flag(
            CheckKind::Undefs,
            "Check uses of undefined values.",
        ))
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::Help)
                .help("Print this help."),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .action(ArgAction::Version)
                .help("Display linter version information."),
        )
        .arg(
            Arg::new("input")
                .value_name("input")
                .value_parser(value_parser!(OsString))
                .action(ArgAction::Append)
                .help("SPIR-V binary to lint (\"-\" for standard input)"),
        )
}

fn check_flag(kind: CheckKind, help: &'static str) -> Arg {
    Arg::new(kind.name())
        .long(kind.flag().trim_start_matches("--"))
        .action(ArgAction::Count)
        .help(help)
}

/// Parse process arguments, `args[0]` being the program name.
///
/// Usage errors are emitted to `consumer` and counted in `outcome`.
pub fn parse<I, T>(args: I, consumer: &mut dyn Consumer, outcome: &mut Outcome) -> Parse
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let matches = match command().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(err) => {
            match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    let _ = err.print();
                }
                _ => outcome.emit(consumer, usage_error(&err)),
            }
            return Parse::Stop;
        }
    };

    let inputs: Vec<&OsString> = matches
        .get_many::<OsString>("input")
        .map(|values| values.collect())
        .unwrap_or_default();
    if inputs.len() > 1 {
        outcome.emit(
            consumer,
            Diagnostic::error("More than one input file specified"),
        );
        return Parse::Stop;
    }
    let input = inputs
        .first()
        .map(|arg| Input::from_arg(arg))
        .unwrap_or_default();

    // clap keeps counts, not positions; recover flag order from the raw
    // arguments it has just validated.
    let checks = args
        .iter()
        .skip(1)
        .take_while(|arg| arg.as_os_str() != "--")
        .filter_map(|arg| arg.to_str().and_then(CheckKind::from_flag))
        .collect();

    Parse::Run(Invocation { checks, input })
}

fn usage_error(err: &clap::Error) -> Diagnostic {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    let message = first.strip_prefix("error: ").unwrap_or(first);
    Diagnostic::error(message).help("run 'spvlint --help' for usage")
}
