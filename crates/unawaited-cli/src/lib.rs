//! Command-line runtime for the `unawaited` checker.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! setup, and dispatch to the `check`, `fix`, and `rules` subcommands. It is
//! exercised both from the binary entrypoint and from tests, where the
//! configuration loader and IO streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use unawaited::Engine;
use unawaited_config::Config;

mod cli;
mod commands;
mod config;
mod discovery;
mod errors;
pub mod output;
mod report;
pub mod telemetry;

use cli::{Cli, CliCommand};
use commands::EXIT_ERROR;
use config::{command_arguments, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat};

/// Bundles the IO streams handed to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    pub(crate) stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E, stdout_is_terminal: bool) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Exit status is `0` on success, `1` when `check` reports findings, and `2`
/// on usage, configuration, or per-file errors.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let result = Cli::try_parse_from(command_arguments(&args, &split))
        .map_err(AppError::CliUsage)
        .and_then(|cli| {
            loader
                .load(&split.config_arguments)
                .map(|config| (cli, config))
        })
        .and_then(|(cli, config)| {
            telemetry::initialise(&config)?;
            execute(cli, &config, io)
        });

    match result {
        Ok(exit_code) => exit_code,
        Err(AppError::CliUsage(error)) => report_usage(&error, io),
        Err(error) => {
            let _ = writeln!(io.stderr, "{error}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn execute<W: Write, E: Write>(
    cli: Cli,
    config: &Config,
    io: &mut IoStreams<'_, W, E>,
) -> Result<ExitCode, AppError> {
    let engine = Engine::new(config.analysis_config());
    match cli.command {
        CliCommand::Check(args) => commands::check(&args, &engine, io),
        CliCommand::Fix(args) => commands::fix(&args, &engine, io),
        CliCommand::Rules { output } => commands::rules(output, &engine, io),
    }
}

/// Help and version requests go to stdout and succeed; usage errors go to
/// stderr with clap's exit status.
fn report_usage<W: Write, E: Write>(error: &clap::Error, io: &mut IoStreams<'_, W, E>) -> ExitCode {
    let _ = if error.use_stderr() {
        write!(io.stderr, "{error}")
    } else {
        write!(io.stdout, "{error}")
    };
    ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(EXIT_ERROR))
}

#[cfg(test)]
mod tests;
