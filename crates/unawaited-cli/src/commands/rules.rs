//! `unawaited rules`.

use std::io::Write;
use std::process::ExitCode;

use unawaited::Engine;

use crate::output::{OutputFormat, ResolvedOutputFormat, render_rules, write_rules_json};
use crate::report::RuleEntry;
use crate::{AppError, IoStreams};

pub(crate) fn rules<W: Write, E: Write>(
    output: OutputFormat,
    engine: &Engine,
    io: &mut IoStreams<'_, W, E>,
) -> Result<ExitCode, AppError> {
    let entries: Vec<RuleEntry<'_>> = engine
        .registry()
        .iter()
        .map(|rule| {
            let metadata = rule.metadata();
            RuleEntry {
                metadata,
                enabled: metadata.enabled_by_default
                    && engine.config().is_rule_enabled(metadata.code),
            }
        })
        .collect();

    match output.resolve(io.stdout_is_terminal) {
        ResolvedOutputFormat::Human => render_rules(io.stdout, &entries)?,
        ResolvedOutputFormat::Json => write_rules_json(io.stdout, &entries)?,
    }
    Ok(ExitCode::SUCCESS)
}
