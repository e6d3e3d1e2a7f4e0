//! Parsing into immutable, error-tolerant syntax trees.
//!
//! A [`ParseResult`] owns both the tree and the text it was built from, so
//! node text can be sliced without threading the source around. Edits never
//! mutate a result; they splice text into a [`crate::SourceDocument`] and
//! parse again.

use std::fmt;
use std::ops::Range;

use tree_sitter::{Node, Tree};

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;
use crate::traverse::Descendants;

/// Longest error excerpt kept in [`SyntaxErrorInfo::context`], in characters.
const EXCERPT_CHARS: usize = 48;

/// A parsed document.
///
/// The tree may contain `ERROR` and `MISSING` nodes; rules skip candidates
/// that contain them.
#[derive(Debug)]
pub struct ParseResult {
    tree: Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Returns the root of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns the parsed source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the grammar the source was parsed with.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the source text covered by `node`.
    ///
    /// A node from another tree whose range does not fall on character
    /// boundaries here yields the empty string.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// Returns `true` when the tree contains any error or missing node.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.root_node().has_error()
    }

    /// Lists every error and missing node in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        Descendants::new(self.root_node())
            .filter(|node| node.is_error() || node.is_missing())
            .map(|node| SyntaxErrorInfo::new(node, &self.source))
            .collect()
    }
}

/// A syntax error located in a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the offending node.
    pub byte_range: Range<usize>,
    /// One-based line of the error.
    pub line: u32,
    /// One-based column of the error.
    pub column: u32,
    /// Excerpt of the offending text, shortened with `...` when long.
    pub context: String,
    /// What went wrong, e.g. `missing :`.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn new(node: Node<'_>, source: &str) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            String::from("syntax error")
        };
        Self {
            context: excerpt(source.get(node.byte_range()).unwrap_or_default()),
            byte_range: node.byte_range(),
            line,
            column,
            message,
        }
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(EXCERPT_CHARS - 3).collect();
    shortened.push_str("...");
    shortened
}

/// A Tree-sitter parser bound to one grammar.
///
/// Parsers hold mutable state and are not shared; each worker owns one or
/// borrows one through [`crate::SyntacticLock`].
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] if the grammar is rejected by
    /// the linked Tree-sitter runtime.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|error| SyntaxError::parser_init(language, error.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Returns the grammar this parser uses.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses `source` from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] when Tree-sitter produces no tree
    /// at all. Malformed input still yields a tree with error nodes.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let Some(tree) = self.inner.parse(source, None) else {
            return Err(SyntaxError::parse(self.language, "parser produced no tree"));
        };
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn parser() -> Parser {
        Parser::new(SupportedLanguage::Python).expect("python grammar")
    }

    #[rstest]
    #[case::plain_function("def hello():\n    pass\n", false)]
    #[case::async_with("async def main():\n    async with lock:\n        pass\n", false)]
    #[case::unclosed_parameters("def broken(", true)]
    #[case::with_missing_colon("with open('f') as f\n    pass\n", true)]
    fn reports_errors(mut parser: Parser, #[case] source: &str, #[case] expected: bool) {
        let result = parser.parse(source).expect("parse");

        assert_eq!(result.has_errors(), expected);
        assert_eq!(result.errors().is_empty(), !expected);
    }

    #[rstest]
    fn errors_are_located_on_their_line(mut parser: Parser) {
        let result = parser.parse("x = 1\ndef broken(:\n").expect("parse");

        let first = result.errors().into_iter().next().expect("an error");
        assert_eq!(first.line, 2);
        assert!(first.column >= 1);
    }

    #[rstest]
    fn text_slices_node_source(mut parser: Parser) {
        let result = parser.parse("value = compute()\n").expect("parse");
        let statement = result.root_node().named_child(0).expect("statement");
        assert_eq!(result.text(statement), "value = compute()");
    }

    #[rstest]
    #[case::short("abc", "abc")]
    #[case::exact(&"x".repeat(48), &"x".repeat(48))]
    #[case::long(&"y".repeat(60), &format!("{}...", "y".repeat(45)))]
    fn excerpts_are_bounded(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(excerpt(text), expected);
    }
}
