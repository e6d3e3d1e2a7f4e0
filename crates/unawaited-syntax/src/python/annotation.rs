//! Reads Python type annotations from their syntax nodes.
//!
//! Annotations arrive as `type` nodes (parameters, returns, annotated
//! assignments) or as plain expressions (class bases). Both forms are
//! converted to an owned [`Annotation`] so that string forward references,
//! which must be parsed separately, come out the same shape. Names stay
//! unresolved here; the module index maps them to qualified names.

use tree_sitter::Node;

use crate::language::SupportedLanguage;
use crate::parser::Parser;

/// A supported annotation expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Annotation {
    /// A possibly dotted name with optional subscript arguments.
    Name {
        /// Dotted path as written, e.g. `asyncio.Task`.
        path: String,
        /// Subscript arguments.
        args: Vec<Annotation>,
    },
    /// `A | B | ...`
    Union(Vec<Annotation>),
    /// A bracketed parameter list as used by `Callable[[A, B], R]`.
    Params(Vec<Annotation>),
    /// The `None` literal.
    NoneLiteral,
    /// The `...` literal.
    Ellipsis,
}

/// Forward references nested deeper than this are rejected.
const MAX_NESTING: usize = 4;

/// Converts an annotation node of a tree parsed from `source`. Returns `None`
/// for anything outside the supported subset.
pub(crate) fn read_annotation(source: &str, node: Node<'_>) -> Option<Annotation> {
    AnnotationReader { source, nesting: 0 }.read(node)
}

struct AnnotationReader<'src> {
    source: &'src str,
    nesting: usize,
}

impl AnnotationReader<'_> {
    fn text(&self, node: Node<'_>) -> Option<&str> {
        self.source.get(node.byte_range())
    }

    fn read(&self, node: Node<'_>) -> Option<Annotation> {
        match node.kind() {
            "type" => self.read(only_named_child(node)?),
            "identifier" => Some(Annotation::Name {
                path: self.text(node)?.to_owned(),
                args: Vec::new(),
            }),
            "none" => Some(Annotation::NoneLiteral),
            "ellipsis" => Some(Annotation::Ellipsis),
            "attribute" => {
                let object = node.child_by_field_name("object")?;
                let attribute = node.child_by_field_name("attribute")?;
                self.dotted(object, attribute)
            }
            "member_type" => {
                let mut cursor = node.walk();
                let mut parts = node.named_children(&mut cursor);
                let (Some(object), Some(attribute)) = (parts.next(), parts.next()) else {
                    return None;
                };
                self.dotted(object, attribute)
            }
            "subscript" => {
                let mut cursor = node.walk();
                let args = node
                    .children_by_field_name("subscript", &mut cursor)
                    .map(|argument| self.read(argument))
                    .collect::<Option<Vec<_>>>()?;
                self.generic(node.child_by_field_name("value")?, args)
            }
            "generic_type" => {
                let mut cursor = node.walk();
                let mut parts = node.named_children(&mut cursor);
                let (Some(base), Some(parameters)) = (parts.next(), parts.next()) else {
                    return None;
                };
                let args = self.children(parameters)?;
                self.generic(base, args)
            }
            "list" => Some(Annotation::Params(self.children(node)?)),
            "union_type" => self.union(node.named_child(0)?, node.named_child(1)?),
            "binary_operator" => {
                let operator = node.child_by_field_name("operator")?;
                if operator.kind() != "|" {
                    return None;
                }
                self.union(
                    node.child_by_field_name("left")?,
                    node.child_by_field_name("right")?,
                )
            }
            "string" => self.forward_reference(node),
            _ => None,
        }
    }

    fn children(&self, node: Node<'_>) -> Option<Vec<Annotation>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| self.read(child))
            .collect()
    }

    fn dotted(&self, object: Node<'_>, attribute: Node<'_>) -> Option<Annotation> {
        let Annotation::Name { path, args } = self.read(object)? else {
            return None;
        };
        if !args.is_empty() || attribute.kind() != "identifier" {
            return None;
        }
        Some(Annotation::Name {
            path: format!("{path}.{}", self.text(attribute)?),
            args,
        })
    }

    fn generic(&self, base: Node<'_>, args: Vec<Annotation>) -> Option<Annotation> {
        match self.read(base)? {
            Annotation::Name {
                path,
                args: existing,
            } if existing.is_empty() => {
                Some(Annotation::Name { path, args })
            }
            _ => None,
        }
    }

    fn union(&self, left: Node<'_>, right: Node<'_>) -> Option<Annotation> {
        let mut members = Vec::new();
        for side in [left, right] {
            match self.read(side)? {
                Annotation::Union(nested) => members.extend(nested),
                member => members.push(member),
            }
        }
        Some(Annotation::Union(members))
    }

    /// Parses the contents of a string annotation such as `"Conn"` as an
    /// expression of its own.
    fn forward_reference(&self, string: Node<'_>) -> Option<Annotation> {
        if self.nesting >= MAX_NESTING {
            return None;
        }
        let mut cursor = string.walk();
        let mut start = None;
        let mut end = None;
        for part in string.children(&mut cursor) {
            match part.kind() {
                "string_start" => start = Some(part),
                "string_end" => end = Some(part),
                "string_content" | "escape_sequence" => {}
                _ => return None,
            }
        }
        let opening = self.text(start?)?;
        if opening.chars().any(|ch| ch.is_ascii_alphabetic()) {
            return None;
        }
        let contents = self.source.get(start?.end_byte()..end?.start_byte())?;

        let parsed = Parser::new(SupportedLanguage::Python)
            .ok()?
            .parse(contents.trim())
            .ok()?;
        if parsed.has_errors() {
            return None;
        }
        let statement = only_named_child(parsed.root_node())?;
        if statement.kind() != "expression_statement" {
            return None;
        }
        AnnotationReader {
            source: parsed.source(),
            nesting: self.nesting + 1,
        }
        .read(only_named_child(statement)?)
    }
}

fn only_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let mut children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment");
    let only = children.next()?;
    children.next().is_none().then_some(only)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::parser::ParseResult;
    use crate::traverse::nodes_of_kind;

    fn parse(source: &str) -> ParseResult {
        Parser::new(SupportedLanguage::Python)
            .expect("parser")
            .parse(source)
            .expect("parse")
    }

    /// Reads the annotation of `value: <text>`.
    fn annotation(text: &str) -> Option<Annotation> {
        let parsed = parse(&format!("value: {text}\n"));
        let assignment = nodes_of_kind(parsed.root_node(), "assignment")
            .next()
            .expect("annotated assignment");
        let node = assignment.child_by_field_name("type").expect("type");
        read_annotation(parsed.source(), node)
    }

    fn name(path: &str, args: Vec<Annotation>) -> Annotation {
        Annotation::Name {
            path: path.to_owned(),
            args,
        }
    }

    #[test]
    fn reads_plain_and_dotted_names() {
        assert_eq!(annotation("Conn"), Some(name("Conn", vec![])));
        assert_eq!(annotation("io.StringIO"), Some(name("io.StringIO", vec![])));
        assert_eq!(
            annotation("concurrent.futures.Future"),
            Some(name("concurrent.futures.Future", vec![]))
        );
    }

    #[test]
    fn reads_generics_and_forward_references() {
        assert_eq!(
            annotation("asyncio.Task['db.Conn']"),
            Some(name("asyncio.Task", vec![name("db.Conn", vec![])]))
        );
        assert_eq!(
            annotation("\"Awaitable[Conn]\""),
            Some(name("Awaitable", vec![name("Conn", vec![])]))
        );
        assert_eq!(
            annotation("dict[str, Conn]"),
            Some(name("dict", vec![name("str", vec![]), name("Conn", vec![])]))
        );
    }

    #[test]
    fn reads_unions_with_none() {
        assert_eq!(
            annotation("Conn | None"),
            Some(Annotation::Union(vec![
                name("Conn", vec![]),
                Annotation::NoneLiteral
            ]))
        );
        assert_eq!(
            annotation("A | B | None"),
            Some(Annotation::Union(vec![
                name("A", vec![]),
                name("B", vec![]),
                Annotation::NoneLiteral
            ]))
        );
    }

    #[test]
    fn reads_callable_parameter_lists() {
        assert_eq!(
            annotation("Callable[[int, str], None]"),
            Some(name(
                "Callable",
                vec![
                    Annotation::Params(vec![name("int", vec![]), name("str", vec![])]),
                    Annotation::NoneLiteral,
                ]
            ))
        );
        assert_eq!(
            annotation("Callable[..., T]"),
            Some(name("Callable", vec![Annotation::Ellipsis, name("T", vec![])]))
        );
    }

    #[test]
    fn reads_class_bases_as_expressions() {
        let parsed = parse("class Pool(typing.Generic[T]): ...\n");
        let class = nodes_of_kind(parsed.root_node(), "class_definition")
            .next()
            .expect("class");
        let bases = class.child_by_field_name("superclasses").expect("bases");
        let base = bases.named_child(0).expect("base");
        assert_eq!(
            read_annotation(parsed.source(), base),
            Some(name("typing.Generic", vec![name("T", vec![])]))
        );
    }

    #[rstest]
    #[case::literal_argument("Literal[-1]")]
    #[case::arithmetic("A + B")]
    #[case::empty_forward_reference("''")]
    #[case::two_names_in_a_string("'Conn Conn'")]
    #[case::broken_forward_reference("'Awaitable[Conn'")]
    #[case::formatted_string("f'{Conn}'")]
    #[case::call("make()")]
    fn rejects_unsupported_annotations(#[case] text: &str) {
        assert_eq!(annotation(text), None);
    }
}
