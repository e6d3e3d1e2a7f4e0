//! JSON documents emitted for `--output json`.

use std::io::Write;

use serde::Serialize;
use unawaited::Finding;

use crate::AppError;
use crate::report::{CheckedFile, FixedFile, RuleEntry};

#[derive(Serialize)]
struct CheckDocument<'a> {
    files_checked: usize,
    findings: Vec<&'a Finding>,
}

#[derive(Serialize)]
struct FixDocument<'a> {
    dry_run: bool,
    files: Vec<&'a FixedFile>,
}

pub(crate) fn write_check_json(out: &mut impl Write, files: &[CheckedFile]) -> Result<(), AppError> {
    let document = CheckDocument {
        files_checked: files.len(),
        findings: files.iter().flat_map(|file| &file.findings).collect(),
    };
    emit(out, &document)
}

/// Only files that had something to fix are listed.
pub(crate) fn write_fix_json(
    out: &mut impl Write,
    files: &[FixedFile],
    dry_run: bool,
) -> Result<(), AppError> {
    let document = FixDocument {
        dry_run,
        files: files.iter().filter(|file| file.has_changes()).collect(),
    };
    emit(out, &document)
}

pub(crate) fn write_rules_json(out: &mut impl Write, rules: &[RuleEntry<'_>]) -> Result<(), AppError> {
    emit(out, &rules)
}

fn emit(out: &mut impl Write, value: &impl Serialize) -> Result<(), AppError> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
