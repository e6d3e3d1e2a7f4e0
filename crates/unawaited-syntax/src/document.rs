//! Source documents and patch application.
//!
//! A [`SourceDocument`] is immutable. Applying a [`Patch`] splices the
//! replacement text into a copy of the source, re-parses it, and checks that
//! the replacement produced a node of the patched kind covering exactly the
//! spliced range without syntax errors.

use std::ops::Range;

use tracing::{debug, warn};
use unawaited_core::{Patch, Span};

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::{ParseResult, Parser};
use crate::traverse::ancestors_and_self;

/// An in-memory source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    uri: String,
    source: String,
    language: SupportedLanguage,
}

impl SourceDocument {
    /// Creates a document.
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        source: impl Into<String>,
        language: SupportedLanguage,
    ) -> Self {
        Self {
            uri: uri.into(),
            source: source.into(),
            language,
        }
    }

    /// Creates a Python document.
    #[must_use]
    pub fn python(uri: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(uri, source, SupportedLanguage::Python)
    }

    /// Returns the document URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the document language.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Consumes the document and returns its source text.
    #[must_use]
    pub fn into_source(self) -> String {
        self.source
    }

    /// Parses the document with a fresh parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be created or produces no tree.
    pub fn parse(&self) -> Result<ParseResult, SyntaxError> {
        Parser::new(self.language)?.parse(&self.source)
    }

    /// Returns the exact source text covered by `span`.
    ///
    /// Returns `None` when the span lies outside the document or splits a
    /// UTF-8 character.
    #[must_use]
    pub fn render_span(&self, span: &Span) -> Option<&str> {
        self.source.get(span.byte_range())
    }

    /// Applies a single patch and returns the patched document.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::RewriteError`] if the target range is outside
    /// the document, and [`SyntaxError::UnsoundReplacement`] if the result
    /// does not re-parse as a node of the target kind at the spliced range.
    pub fn apply(&self, patch: &Patch) -> Result<Self, SyntaxError> {
        let range = patch.target().span().byte_range();
        let output = splice(&self.source, range.clone(), patch.replacement())?;
        let patched = self.with_source(output);
        let parsed = patched.parse()?;
        let new_range = range.start..range.start + patch.replacement().len();
        verify_replacement(&parsed, patch.target().kind(), new_range)?;
        Ok(patched)
    }

    /// Applies a batch of patches computed against this document.
    ///
    /// Patches are ordered by start offset. A patch that overlaps one already
    /// accepted is skipped. Accepted patches are spliced from the end of the
    /// document backwards, so every patch sees the offsets it was computed
    /// against, and the result is re-parsed once and verified per patch.
    ///
    /// # Errors
    ///
    /// Returns an error if an accepted patch is out of range or unsound.
    pub fn apply_all(&self, patches: &[Patch]) -> Result<BatchOutcome, SyntaxError> {
        let (applied, skipped) = partition_overlapping(patches);
        for patch in &skipped {
            warn!(
                uri = %self.uri,
                kind = patch.target().kind(),
                start = patch.target().span().start_byte(),
                "skipping patch that overlaps an earlier one"
            );
        }
        if applied.is_empty() {
            return Ok(BatchOutcome {
                document: self.clone(),
                applied,
                skipped,
            });
        }

        let mut output = self.source.clone();
        for patch in applied.iter().rev() {
            let range = patch.target().span().byte_range();
            output = splice(&output, range, patch.replacement())?;
        }
        let patched = self.with_source(output);
        let parsed = patched.parse()?;

        let mut delta: isize = 0;
        for patch in &applied {
            let range = patch.target().span().byte_range();
            let start = shift(range.start, delta)?;
            let new_range = start..start + patch.replacement().len();
            verify_replacement(&parsed, patch.target().kind(), new_range)?;
            delta += length_delta(range.len(), patch.replacement().len());
        }
        debug!(
            uri = %self.uri,
            applied = applied.len(),
            skipped = skipped.len(),
            "applied patch batch"
        );

        Ok(BatchOutcome {
            document: patched,
            applied,
            skipped,
        })
    }

    fn with_source(&self, source: String) -> Self {
        Self {
            uri: self.uri.clone(),
            source,
            language: self.language,
        }
    }
}

/// Result of applying a batch of patches.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    document: SourceDocument,
    applied: Vec<Patch>,
    skipped: Vec<Patch>,
}

impl BatchOutcome {
    /// Returns the patched document.
    #[must_use]
    pub const fn document(&self) -> &SourceDocument {
        &self.document
    }

    /// Consumes the outcome and returns the patched document.
    #[must_use]
    pub fn into_document(self) -> SourceDocument {
        self.document
    }

    /// Returns the patches that were applied, in source order.
    #[must_use]
    pub fn applied(&self) -> &[Patch] {
        &self.applied
    }

    /// Returns the patches skipped because they overlapped an earlier one.
    #[must_use]
    pub fn skipped(&self) -> &[Patch] {
        &self.skipped
    }

    /// Returns whether any patch was applied.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.applied.is_empty()
    }
}

fn partition_overlapping(patches: &[Patch]) -> (Vec<Patch>, Vec<Patch>) {
    let mut ordered: Vec<&Patch> = patches.iter().collect();
    ordered.sort_by_key(|patch| {
        let span = patch.target().span();
        (span.start_byte(), span.end_byte())
    });

    let mut applied: Vec<Patch> = Vec::with_capacity(ordered.len());
    let mut skipped = Vec::new();
    for patch in ordered {
        if applied.iter().any(|accepted| accepted.overlaps(patch)) {
            skipped.push(patch.clone());
        } else {
            applied.push(patch.clone());
        }
    }
    (applied, skipped)
}

fn splice(source: &str, range: Range<usize>, replacement: &str) -> Result<String, SyntaxError> {
    if range.start > range.end || range.end > source.len() {
        return Err(SyntaxError::rewrite(format!(
            "patch range {}..{} is outside a document of {} bytes",
            range.start,
            range.end,
            source.len()
        )));
    }
    if !source.is_char_boundary(range.start) || !source.is_char_boundary(range.end) {
        return Err(SyntaxError::internal_error(
            "patch range is not on a UTF-8 boundary",
        ));
    }
    let mut output = source.to_owned();
    output.replace_range(range, replacement);
    Ok(output)
}

fn verify_replacement(
    parsed: &ParseResult,
    kind: &str,
    range: Range<usize>,
) -> Result<(), SyntaxError> {
    let Some(smallest) = parsed
        .root_node()
        .descendant_for_byte_range(range.start, range.end)
    else {
        return Err(SyntaxError::unsound_replacement(
            kind,
            range,
            "no node covers the replacement",
        ));
    };

    let node = ancestors_and_self(smallest)
        .take_while(|node| node.byte_range() == range)
        .find(|node| node.kind() == kind);

    match node {
        Some(found) if !found.has_error() => Ok(()),
        Some(_) => Err(SyntaxError::unsound_replacement(
            kind,
            range,
            "replacement contains syntax errors",
        )),
        None => Err(SyntaxError::unsound_replacement(
            kind,
            range,
            format!("re-parsed as {}", smallest.kind()),
        )),
    }
}

fn shift(offset: usize, delta: isize) -> Result<usize, SyntaxError> {
    offset
        .checked_add_signed(delta)
        .ok_or_else(|| SyntaxError::internal_error("patch offset underflow"))
}

fn length_delta(old_len: usize, new_len: usize) -> isize {
    let old = isize::try_from(old_len).unwrap_or(isize::MAX);
    let new = isize::try_from(new_len).unwrap_or(isize::MAX);
    new - old
}
