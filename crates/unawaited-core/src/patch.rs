//! Structural edits produced by rule fixers.
//!
//! A [`Patch`] replaces one syntax node with freshly built source text. It is
//! plain data: hosts apply it to a document to obtain a new document, leaving
//! the original untouched.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Identifies a syntax node by kind and exact span.
///
/// # Example
///
/// ```
/// use unawaited_core::{LineCol, NodeRef, Span};
///
/// let span = Span::new(5, 20, LineCol::new(0, 5), LineCol::new(0, 20));
/// let node = NodeRef::new("with_clause", span);
/// assert_eq!(node.kind(), "with_clause");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    kind: String,
    span: Span,
}

impl NodeRef {
    /// Creates a node reference.
    #[must_use]
    pub fn new(kind: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            span,
        }
    }

    /// Returns the grammar kind of the node.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the span of the node.
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }
}

/// Replaces a target node with new source text.
///
/// The replacement must parse as a node of the same kind as the target; hosts
/// verify this when applying the patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    /// The node being replaced.
    target: NodeRef,
    /// Source text of the replacement node.
    replacement: String,
}

impl Patch {
    /// Creates a patch replacing `target` with `replacement`.
    #[must_use]
    pub fn new(target: NodeRef, replacement: impl Into<String>) -> Self {
        Self {
            target,
            replacement: replacement.into(),
        }
    }

    /// Returns the node being replaced.
    #[must_use]
    pub const fn target(&self) -> &NodeRef {
        &self.target
    }

    /// Returns the replacement source text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns `true` if the two patches touch overlapping byte ranges.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.target.span().overlaps(other.target.span())
    }
}
