//! `unawaited check`.

use std::io::Write;
use std::process::ExitCode;

use camino::Utf8Path;
use rayon::prelude::*;
use tracing::info;
use unawaited::Engine;

use super::{exit_code, partition_results, read_document, report_failures};
use crate::cli::CheckArgs;
use crate::discovery::discover;
use crate::output::{ResolvedOutputFormat, render_check, write_check_json};
use crate::report::CheckedFile;
use crate::{AppError, IoStreams};

pub(crate) fn check<W: Write, E: Write>(
    args: &CheckArgs,
    engine: &Engine,
    io: &mut IoStreams<'_, W, E>,
) -> Result<ExitCode, AppError> {
    let files = discover(&args.paths)?;
    let results: Vec<_> = files
        .par_iter()
        .map(|path| check_file(engine, path))
        .collect();
    let (checked, failures) = partition_results(results);

    match args.output.resolve(io.stdout_is_terminal) {
        ResolvedOutputFormat::Human => render_check(io.stdout, &checked)?,
        ResolvedOutputFormat::Json => write_check_json(io.stdout, &checked)?,
    }
    report_failures(io.stderr, &failures)?;

    let findings: usize = checked.iter().map(|file| file.findings.len()).sum();
    info!(
        files = files.len(),
        findings,
        failures = failures.len(),
        "check finished"
    );
    Ok(exit_code(findings > 0, !failures.is_empty()))
}

fn check_file(engine: &Engine, path: &Utf8Path) -> Result<CheckedFile, AppError> {
    let document = read_document(path)?;
    let findings = engine
        .analyze(&document)
        .map_err(|source| AppError::Analysis {
            path: path.to_owned(),
            source,
        })?;
    Ok(CheckedFile {
        path: path.to_owned(),
        document,
        findings,
    })
}
