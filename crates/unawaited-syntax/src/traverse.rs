//! Lazy tree traversal helpers.

use tree_sitter::{Node, TreeCursor};

/// Pre-order iterator over a node and all of its descendants.
///
/// The iterator drives a single [`TreeCursor`], so it allocates nothing per
/// node and never leaves the subtree it was created for.
pub struct Descendants<'tree> {
    cursor: TreeCursor<'tree>,
    depth: usize,
    done: bool,
}

impl<'tree> Descendants<'tree> {
    /// Starts a traversal rooted at `node`.
    #[must_use]
    pub fn new(node: Node<'tree>) -> Self {
        Self {
            cursor: node.walk(),
            depth: 0,
            done: false,
        }
    }

    fn advance(&mut self) {
        if self.cursor.goto_first_child() {
            self.depth += 1;
            return;
        }
        loop {
            if self.depth == 0 {
                self.done = true;
                return;
            }
            if self.cursor.goto_next_sibling() {
                return;
            }
            if self.cursor.goto_parent() {
                self.depth -= 1;
            } else {
                self.done = true;
                return;
            }
        }
    }
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        self.advance();
        Some(node)
    }
}

/// Returns every node of `kind` in the subtree rooted at `root`, in source
/// order.
pub fn nodes_of_kind<'tree>(
    root: Node<'tree>,
    kind: &'static str,
) -> impl Iterator<Item = Node<'tree>> {
    Descendants::new(root).filter(move |node| node.kind() == kind)
}

/// Returns `node` followed by each of its ancestors up to the root.
pub fn ancestors_and_self(node: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    std::iter::successors(Some(node), Node::parent)
}

/// Returns `true` when the first token of `node` is the `async` keyword.
#[must_use]
pub fn starts_with_async(node: Node<'_>) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parser, SupportedLanguage};

    fn parse(source: &str) -> crate::ParseResult {
        Parser::new(SupportedLanguage::Python)
            .expect("parser")
            .parse(source)
            .expect("parse")
    }

    #[test]
    fn descendants_visit_in_source_order() {
        let parsed = parse("a = 1\nb = 2\n");
        let names: Vec<&str> = nodes_of_kind(parsed.root_node(), "identifier")
            .map(|node| parsed.text(node))
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn descendants_stay_inside_the_starting_subtree() {
        let parsed = parse("def f():\n    x = 1\ny = 2\n");
        let function = parsed.root_node().named_child(0).expect("function");
        let names: Vec<&str> = nodes_of_kind(function, "identifier")
            .map(|node| parsed.text(node))
            .collect();
        assert_eq!(names, ["f", "x"]);
    }

    #[test]
    fn descendants_include_the_root() {
        let parsed = parse("pass\n");
        let first = Descendants::new(parsed.root_node()).next().expect("root");
        assert_eq!(first.kind(), "module");
    }

    #[test]
    fn ancestors_end_at_module() {
        let parsed = parse("def f():\n    return x\n");
        let ident = nodes_of_kind(parsed.root_node(), "identifier")
            .last()
            .expect("identifier");
        let kinds: Vec<&str> = ancestors_and_self(ident).map(|n| n.kind()).collect();
        assert_eq!(kinds.first(), Some(&"identifier"));
        assert_eq!(kinds.last(), Some(&"module"));
        assert!(kinds.contains(&"function_definition"));
    }

    #[test]
    fn async_prefix_is_detected() {
        let parsed = parse("async def f():\n    pass\ndef g():\n    pass\n");
        let root = parsed.root_node();
        assert!(starts_with_async(root.named_child(0).expect("f")));
        assert!(!starts_with_async(root.named_child(1).expect("g")));
    }
}
