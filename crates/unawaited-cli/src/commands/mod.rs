//! Subcommand implementations.
//!
//! `check` and `fix` discover files, process them in parallel on the rayon
//! pool, and report per-file failures on stderr without aborting the run.

mod check;
mod fix;
mod rules;

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use camino::Utf8Path;
use unawaited::{SourceDocument, SupportedLanguage};

pub(crate) use check::check;
pub(crate) use fix::fix;
pub(crate) use rules::rules;

use crate::AppError;

/// Exit status when `check` reports at least one finding.
pub(crate) const EXIT_FINDINGS: u8 = 1;
/// Exit status for configuration, usage, and per-file failures.
pub(crate) const EXIT_ERROR: u8 = 2;

fn read_document(path: &Utf8Path) -> Result<SourceDocument, AppError> {
    let source = fs::read_to_string(path).map_err(|source| AppError::ReadSource {
        path: path.to_owned(),
        source,
    })?;
    let language = SupportedLanguage::from_path(path.as_std_path()).unwrap_or_default();
    Ok(SourceDocument::new(path.as_str(), source, language))
}

fn partition_results<T>(results: Vec<Result<T, AppError>>) -> (Vec<T>, Vec<AppError>) {
    let mut successes = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(value) => successes.push(value),
            Err(error) => failures.push(error),
        }
    }
    (successes, failures)
}

fn report_failures(stderr: &mut impl Write, failures: &[AppError]) -> Result<(), AppError> {
    for failure in failures {
        writeln!(stderr, "{failure}")?;
    }
    Ok(())
}

fn exit_code(has_findings: bool, has_failures: bool) -> ExitCode {
    if has_failures {
        ExitCode::from(EXIT_ERROR)
    } else if has_findings {
        ExitCode::from(EXIT_FINDINGS)
    } else {
        ExitCode::SUCCESS
    }
}
