//! CLI argument definitions for the `unawaited` binary.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Finds `with` statements that bind a pending computation instead of its
/// awaited result.
#[derive(Parser, Debug)]
#[command(name = "unawaited", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The action to perform.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands of the `unawaited` binary.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Reports findings without touching any file.
    Check(CheckArgs),
    /// Inserts the missing `await`s and writes the files back.
    Fix(FixArgs),
    /// Lists the registered rules.
    Rules {
        /// Controls how the rule table is rendered.
        #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
        output: OutputFormat,
    },
}

/// Arguments of `unawaited check`.
#[derive(Args, Debug, Clone)]
pub(crate) struct CheckArgs {
    /// Files or directories to analyse.
    #[arg(value_name = "PATH", required = true)]
    pub(crate) paths: Vec<Utf8PathBuf>,
    /// Controls how findings are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
}

/// Arguments of `unawaited fix`.
#[derive(Args, Debug, Clone)]
pub(crate) struct FixArgs {
    /// Files or directories to fix.
    #[arg(value_name = "PATH", required = true)]
    pub(crate) paths: Vec<Utf8PathBuf>,
    /// Computes and validates fixes without writing any file.
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// Controls how the fix report is rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
}
