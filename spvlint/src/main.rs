mod cli;
mod driver;
mod exit;

use std::process::ExitCode;

use eyre::Result;
use spvlint_core::StreamConsumer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut consumer = StreamConsumer::stderr();
    let exit = driver::run(std::env::args_os(), &mut consumer, std::io::stdin().lock());

    Ok(exit.into())
}
