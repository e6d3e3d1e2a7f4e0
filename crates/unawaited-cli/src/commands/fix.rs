//! `unawaited fix`.

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use camino::Utf8Path;
use rayon::prelude::*;
use tracing::info;
use unawaited::{Engine, SourceDocument};
use unawaited_syntax::SyntacticLock;

use super::{exit_code, partition_results, read_document, report_failures};
use crate::cli::FixArgs;
use crate::discovery::discover;
use crate::output::{ResolvedOutputFormat, render_fix, write_fix_json};
use crate::report::FixedFile;
use crate::{AppError, IoStreams};

pub(crate) fn fix<W: Write, E: Write>(
    args: &FixArgs,
    engine: &Engine,
    io: &mut IoStreams<'_, W, E>,
) -> Result<ExitCode, AppError> {
    let files = discover(&args.paths)?;
    let lock = SyntacticLock::new();
    let results: Vec<_> = files
        .par_iter()
        .map(|path| fix_file(engine, &lock, path, args.dry_run))
        .collect();
    let (fixed, failures) = partition_results(results);

    match args.output.resolve(io.stdout_is_terminal) {
        ResolvedOutputFormat::Human => render_fix(io.stdout, &fixed, args.dry_run)?,
        ResolvedOutputFormat::Json => write_fix_json(io.stdout, &fixed, args.dry_run)?,
    }
    report_failures(io.stderr, &failures)?;

    info!(
        files = files.len(),
        applied = fixed.iter().map(|file| file.applied).sum::<usize>(),
        failures = failures.len(),
        dry_run = args.dry_run,
        "fix finished"
    );
    Ok(exit_code(false, !failures.is_empty()))
}

fn fix_file(
    engine: &Engine,
    lock: &SyntacticLock,
    path: &Utf8Path,
    dry_run: bool,
) -> Result<FixedFile, AppError> {
    let document = read_document(path)?;
    let analysis_error = |source| AppError::Analysis {
        path: path.to_owned(),
        source,
    };
    let outcome = engine.fix_all(&document).map_err(analysis_error)?;

    let mut written = false;
    if outcome.has_changes() {
        ensure_no_new_syntax_errors(lock, path, &document, outcome.document())?;
        if !dry_run {
            fs::write(path, outcome.document().source()).map_err(|source| {
                AppError::WriteSource {
                    path: path.to_owned(),
                    source,
                }
            })?;
            written = true;
        }
    }

    info!(
        path = %path,
        applied = outcome.applied().len(),
        skipped = outcome.skipped().len(),
        written,
        "processed file"
    );
    Ok(FixedFile {
        path: path.to_owned(),
        applied: outcome.applied().len(),
        skipped: outcome.skipped().len(),
        written,
    })
}

/// Rejects a rewrite that parses with more errors than the file it replaces.
///
/// Files that already had syntax errors can still be fixed elsewhere; the
/// rewrite just must not add any.
fn ensure_no_new_syntax_errors(
    lock: &SyntacticLock,
    path: &Utf8Path,
    before: &SourceDocument,
    after: &SourceDocument,
) -> Result<(), AppError> {
    let validation_error = |source: unawaited_syntax::SyntaxError| AppError::Analysis {
        path: path.to_owned(),
        source: source.into(),
    };
    let baseline = lock.validate(before).map_err(validation_error)?.len();
    let failures = lock.validate(after).map_err(validation_error)?;
    if failures.len() <= baseline {
        return Ok(());
    }
    Err(AppError::FixValidation {
        path: path.to_owned(),
        message: failures
            .first()
            .map_or_else(String::new, ToString::to_string),
    })
}
