//! CLI entrypoint for the `unawaited` checker.
//!
//! The binary delegates to [`unawaited_cli::run`], which loads configuration,
//! parses the subcommand, and reports or fixes missing `await`s in `with`
//! statements.

use std::io::{self, IsTerminal, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    unawaited_cli::run(
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
