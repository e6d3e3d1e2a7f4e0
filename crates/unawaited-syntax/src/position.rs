//! Conversions from Tree-sitter positions to core spans.
//!
//! Tree-sitter positions are zero-based, which is also what [`LineCol`]
//! stores. One-based coordinates are only produced for display.

use unawaited_core::{LineCol, Span};

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    line_col(pos).one_based()
}

/// Converts a Tree-sitter position to a zero-based [`LineCol`].
#[must_use]
pub fn line_col(pos: tree_sitter::Point) -> LineCol {
    LineCol::new(clamp(pos.row), clamp(pos.column))
}

/// Returns the span covered by `node`.
#[must_use]
pub fn span_of(node: tree_sitter::Node<'_>) -> Span {
    span_between(node, node)
}

/// Returns the span from the start of `first` to the end of `last`.
#[must_use]
pub fn span_between(first: tree_sitter::Node<'_>, last: tree_sitter::Node<'_>) -> Span {
    Span::new(
        clamp(first.start_byte()),
        clamp(last.end_byte()),
        line_col(first.start_position()),
        line_col(last.end_position()),
    )
}

fn clamp(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
