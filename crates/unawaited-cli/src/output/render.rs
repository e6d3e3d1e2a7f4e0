//! Human-readable rendering of findings, fix reports, and the rule table.

use std::io::{self, Write};

use unawaited::{Finding, Span};
use unicode_width::UnicodeWidthStr;

use crate::report::{CheckedFile, FixedFile, RuleEntry};

const CONTEXT_LINES: usize = 1;

pub(crate) fn render_check(out: &mut impl Write, files: &[CheckedFile]) -> io::Result<()> {
    let mut total = 0;
    for file in files {
        for finding in &file.findings {
            render_finding(out, file, finding)?;
            total += 1;
        }
    }
    writeln!(
        out,
        "{} in {} checked",
        counted(total, "finding", "findings"),
        counted(files.len(), "file", "files")
    )
}

fn render_finding(out: &mut impl Write, file: &CheckedFile, finding: &Finding) -> io::Result<()> {
    let span = finding.span();
    let (line, column) = span.start().one_based();
    writeln!(out, "{finding}")?;
    writeln!(out, "  --> {}:{line}:{column}", file.path)?;

    let source = file.document.source();
    let target = to_usize(span.start().line());
    let first = target.saturating_sub(CONTEXT_LINES);
    let last = target
        .saturating_add(CONTEXT_LINES)
        .min(source.lines().count().saturating_sub(1));
    let width = last.saturating_add(1).to_string().len();

    writeln!(out, "{:>width$} |", "")?;
    for (index, text) in source
        .lines()
        .enumerate()
        .skip(first)
        .take(last.saturating_sub(first).saturating_add(1))
    {
        writeln!(out, "{:>width$} | {text}", index + 1)?;
        if index == target {
            writeln!(out, "{:>width$} | {}", "", caret_line(text, span))?;
        }
    }
    writeln!(out)
}

/// Underlines the part of `text` covered by `span`, measured in display
/// columns. Multi-line spans are underlined to the end of their first line.
fn caret_line(text: &str, span: &Span) -> String {
    let start = to_usize(span.start().column());
    let end = if span.end().line() == span.start().line() {
        to_usize(span.end().column())
    } else {
        text.len()
    };
    let indent = text.get(..start).map_or(start, UnicodeWidthStr::width);
    let marked = text
        .get(start..end)
        .map_or(1, UnicodeWidthStr::width)
        .max(1);
    format!("{}{}", " ".repeat(indent), "^".repeat(marked))
}

pub(crate) fn render_fix(out: &mut impl Write, files: &[FixedFile], dry_run: bool) -> io::Result<()> {
    let verb = if dry_run { "would apply" } else { "applied" };
    let mut applied = 0;
    let mut touched = 0;
    for file in files.iter().filter(|file| file.has_changes()) {
        write!(
            out,
            "{}: {verb} {}",
            file.path,
            counted(file.applied, "fix", "fixes")
        )?;
        if file.skipped > 0 {
            write!(out, ", skipped {} overlapping", file.skipped)?;
        }
        writeln!(out)?;
        applied += file.applied;
        touched += 1;
    }
    let suffix = if dry_run { " (dry run)" } else { "" };
    writeln!(
        out,
        "{} {verb} across {}{suffix}",
        counted(applied, "fix", "fixes"),
        counted(touched, "file", "files")
    )
}

pub(crate) fn render_rules(out: &mut impl Write, rules: &[RuleEntry<'_>]) -> io::Result<()> {
    for entry in rules {
        let metadata = entry.metadata;
        write!(
            out,
            "{} {} [{}, {}",
            metadata.code, metadata.name, metadata.default_severity, metadata.category
        )?;
        if metadata.is_fixable() {
            write!(out, ", fixable")?;
        }
        if !entry.enabled {
            write!(out, ", disabled")?;
        }
        writeln!(out, "]")?;
        writeln!(out, "    {}", metadata.title)?;
    }
    Ok(())
}

fn counted(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
