//! Candidate discovery and finding construction.

use tracing::debug;
use tree_sitter::Node;
use unawaited_core::{Finding, Span};
use unawaited_syntax::{nodes_of_kind, span_between, span_of, starts_with_async};

use super::predicate::is_deferred_disposable;
use super::{METADATA, WITH_MISSING_AWAIT};
use crate::rule::RuleContext;

pub(super) const STATEMENT_KIND: &str = "with_statement";
const CLAUSE_KIND: &str = "with_clause";
const ITEM_KIND: &str = "with_item";
const NAMED_ITEM_KIND: &str = "as_pattern";
const HEADER_TERMINATOR: &str = ":";

const MESSAGE_EXPLANATION: &str =
    "this disposes the pending computation handle, not the computation's eventual result";

/// A synchronous `with` statement with at least one `as` binding.
#[derive(Debug)]
pub(super) struct Candidate<'tree> {
    statement: Node<'tree>,
    clause: Node<'tree>,
    initializers: Vec<Node<'tree>>,
}

impl<'tree> Candidate<'tree> {
    /// Returns `None` for `async with`, statements containing syntax errors,
    /// and statements that bind no name.
    pub(super) fn from_statement(statement: Node<'tree>) -> Option<Self> {
        if statement.kind() != STATEMENT_KIND || starts_with_async(statement) {
            return None;
        }
        if statement.has_error() {
            debug!(
                line = span_of(statement).start().one_based().0,
                "skipping malformed with statement"
            );
            return None;
        }
        let clause = child_of_kind(statement, CLAUSE_KIND)?;
        let mut cursor = clause.walk();
        let initializers: Vec<Node<'tree>> = clause
            .named_children(&mut cursor)
            .filter(|item| item.kind() == ITEM_KIND)
            .filter_map(|item| item.child_by_field_name("value"))
            .filter(|value| value.kind() == NAMED_ITEM_KIND)
            .filter_map(|pattern| pattern.named_child(0))
            .collect();
        if initializers.is_empty() {
            return None;
        }
        Some(Self {
            statement,
            clause,
            initializers,
        })
    }

    /// Returns the declaration list of the header.
    pub(super) const fn clause(&self) -> Node<'tree> {
        self.clause
    }

    /// Returns the span from the `with` keyword through the `:` terminator.
    pub(super) fn header(&self) -> Span {
        let terminator = child_of_kind(self.statement, HEADER_TERMINATOR).unwrap_or(self.clause);
        span_between(self.statement, terminator)
    }

    /// Returns the initializers, in source order, whose type is a pending
    /// computation of a disposable resource.
    pub(super) fn deferred_initializers(&self, context: &RuleContext<'_>) -> Vec<Node<'tree>> {
        self.initializers
            .iter()
            .copied()
            .filter(|initializer| {
                let Some(ty) = context.oracle().resolve_type(*initializer) else {
                    debug!(
                        initializer = context.parsed().text(*initializer),
                        "initializer type is unresolved"
                    );
                    return false;
                };
                is_deferred_disposable(&ty, context.oracle(), context.config())
            })
            .collect()
    }
}

/// Reports one finding per offending `with` statement.
pub(super) fn analyze(context: &RuleContext<'_>) -> Vec<Finding> {
    nodes_of_kind(context.parsed().root_node(), STATEMENT_KIND)
        .filter_map(Candidate::from_statement)
        .filter(|candidate| !candidate.deferred_initializers(context).is_empty())
        .map(|candidate| finding(context, &candidate))
        .collect()
}

fn finding(context: &RuleContext<'_>, candidate: &Candidate<'_>) -> Finding {
    let span = candidate.header();
    let snippet = context
        .parsed()
        .source()
        .get(span.byte_range())
        .unwrap_or_default();
    Finding::new(
        WITH_MISSING_AWAIT,
        context.uri(),
        span,
        format!("await is missing in with statement '{snippet}'; {MESSAGE_EXPLANATION}"),
        METADATA.default_severity,
    )
}

fn child_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|child| child.kind() == kind)
}
