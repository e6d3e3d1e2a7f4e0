//! Builds the `await`-inserting patch for a reported `with` statement.

use tracing::debug;
use tree_sitter::Node;
use unawaited_core::{NodeRef, Patch, Span};
use unawaited_syntax::{ParseResult, ancestors_and_self, span_of, starts_with_async};

use super::matcher::{Candidate, STATEMENT_KIND};
use crate::rule::RuleContext;

/// Expression kinds that bind tighter than `await` and need no parentheses.
const AWAITABLE_ATOMS: &[&str] = &[
    "identifier",
    "call",
    "attribute",
    "subscript",
    "parenthesized_expression",
];

/// Scopes that decide whether `await` is legal in their body.
const SCOPE_KINDS: &[&str] = &["function_definition", "lambda", "class_definition"];

/// Returns a patch replacing the declaration list of the `with` statement at
/// `span`, or `None` when no statement there still needs fixing or `await`
/// cannot be used there.
pub(super) fn fix(context: &RuleContext<'_>, span: &Span) -> Option<Patch> {
    let parsed = context.parsed();
    let range = span.byte_range();
    let Some(statement) = parsed
        .root_node()
        .descendant_for_byte_range(range.start, range.end)
        .and_then(|covering| {
            ancestors_and_self(covering).find(|node| node.kind() == STATEMENT_KIND)
        })
    else {
        debug!(
            uri = context.uri(),
            start = %span.start(),
            "no with statement at finding location"
        );
        return None;
    };

    if !in_async_function(statement) {
        debug!(
            uri = context.uri(),
            start = %span.start(),
            "with statement is outside an async function; leaving it unchanged"
        );
        return None;
    }

    let candidate = Candidate::from_statement(statement)?;
    let targets = candidate.deferred_initializers(context);
    if targets.is_empty() {
        debug!(uri = context.uri(), "with statement no longer needs await");
        return None;
    }

    let clause = candidate.clause();
    let replacement = rewrite_clause(parsed, clause, &targets)?;
    Some(Patch::new(
        NodeRef::new(clause.kind(), span_of(clause)),
        replacement,
    ))
}

/// Returns `true` when the nearest enclosing scope of `statement` is an
/// `async def`. Module level, class bodies and plain functions reject `await`.
fn in_async_function(statement: Node<'_>) -> bool {
    ancestors_and_self(statement)
        .skip(1)
        .find(|node| SCOPE_KINDS.contains(&node.kind()))
        .is_some_and(|scope| scope.kind() == "function_definition" && starts_with_async(scope))
}

/// Rebuilds the text of `clause` with each of `targets` awaited. Everything
/// between targets is copied verbatim.
fn rewrite_clause(parsed: &ParseResult, clause: Node<'_>, targets: &[Node<'_>]) -> Option<String> {
    let source = parsed.source();
    let mut rewritten = String::with_capacity(clause.byte_range().len());
    let mut cursor = clause.start_byte();
    for target in targets {
        rewritten.push_str(source.get(cursor..target.start_byte())?);
        rewritten.push_str(&awaited(parsed.text(*target), target.kind()));
        cursor = target.end_byte();
    }
    rewritten.push_str(source.get(cursor..clause.end_byte())?);
    Some(rewritten)
}

fn awaited(expression: &str, kind: &str) -> String {
    if AWAITABLE_ATOMS.contains(&kind) {
        format!("await {expression}")
    } else {
        format!("await ({expression})")
    }
}
