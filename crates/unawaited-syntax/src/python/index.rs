//! Module-level symbol index: imports, classes, and function signatures.

use std::collections::HashMap;

use tree_sitter::Node;

use super::annotation::{Annotation, read_annotation};
use crate::parser::ParseResult;
use crate::traverse::{Descendants, ancestors_and_self, starts_with_async};
use crate::types::{QualifiedName, TypeRef};

/// Declared signature of a function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionSignature {
    pub(crate) is_async: bool,
    pub(crate) returns: Option<TypeRef>,
}

/// Facts about one class definition.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClassInfo {
    pub(crate) bases: Vec<QualifiedName>,
    pub(crate) methods: HashMap<String, FunctionSignature>,
}

/// Flow-insensitive symbol table for one parsed module.
#[derive(Debug, Default)]
pub(crate) struct ModuleIndex {
    module: String,
    imports: HashMap<String, QualifiedName>,
    local_classes: HashMap<String, QualifiedName>,
    classes: HashMap<QualifiedName, ClassInfo>,
    functions: HashMap<String, FunctionSignature>,
}

impl ModuleIndex {
    /// Indexes `parsed` as the module named `module`.
    ///
    /// Names are collected before signatures so annotations may refer to
    /// classes defined later in the file.
    pub(crate) fn build(parsed: &ParseResult, module: &str) -> Self {
        let mut index = Self {
            module: module.to_owned(),
            ..Self::default()
        };
        let root = parsed.root_node();

        for node in Descendants::new(root) {
            match node.kind() {
                "import_statement" => index.record_import(parsed, node),
                "import_from_statement" => index.record_from_import(parsed, node),
                "class_definition" => index.record_class_name(parsed, node),
                _ => {}
            }
        }

        for node in Descendants::new(root) {
            match node.kind() {
                "class_definition" => index.record_class_body(parsed, node),
                "function_definition" if enclosing_class(node).is_none() => {
                    if let Some(name) = node.child_by_field_name("name") {
                        let signature = index.signature(parsed, node);
                        index
                            .functions
                            .insert(parsed.text(name).to_owned(), signature);
                    }
                }
                _ => {}
            }
        }
        index
    }

    /// Returns the module name classes are qualified with.
    pub(crate) fn module(&self) -> &str {
        &self.module
    }

    pub(crate) fn class(&self, name: &QualifiedName) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    pub(crate) fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    /// Maps a dotted name as written in this module to a qualified name.
    ///
    /// Imports win over local classes; unknown bare names are treated as
    /// builtins and unknown dotted names are taken as already qualified.
    pub(crate) fn resolve_name(&self, path: &str) -> QualifiedName {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let resolved = if let Some(imported) = self.imports.get(head) {
            rest.map_or_else(|| imported.clone(), |tail| imported.child(tail))
        } else if let Some(class) = self.local_classes.get(path) {
            class.clone()
        } else if let Some(class) = self.local_classes.get(head) {
            rest.map_or_else(|| class.clone(), |tail| class.child(tail))
        } else if rest.is_some() {
            QualifiedName::new(path)
        } else {
            QualifiedName::new(format!("builtins.{path}"))
        };
        normalise_module(resolved)
    }

    /// Converts an annotation node (or a class base expression) to a
    /// resolved type.
    pub(crate) fn annotation_type(&self, parsed: &ParseResult, node: Node<'_>) -> Option<TypeRef> {
        self.type_from(&read_annotation(parsed.source(), node)?)
    }

    /// Returns the qualified name of a `class_definition` node.
    pub(crate) fn class_name(&self, parsed: &ParseResult, class: Node<'_>) -> QualifiedName {
        let mut segments: Vec<&str> = ancestors_and_self(class)
            .filter(|node| node.kind() == "class_definition")
            .filter_map(|node| node.child_by_field_name("name"))
            .map(|name| parsed.text(name))
            .collect();
        segments.reverse();
        QualifiedName::new(format!("{}.{}", self.module, segments.join(".")))
    }

    fn type_from(&self, annotation: &Annotation) -> Option<TypeRef> {
        match annotation {
            Annotation::NoneLiteral => Some(TypeRef::named("builtins.None")),
            Annotation::Union(members) => self.union_type(members),
            Annotation::Params(_) | Annotation::Ellipsis => None,
            Annotation::Name { path, args } => {
                let name = self.resolve_name(path);
                let arguments: Vec<TypeRef> = args
                    .iter()
                    .map(|arg| {
                        self.type_from(arg)
                            .unwrap_or_else(|| TypeRef::named("typing.Any"))
                    })
                    .collect();
                Some(simplify(name, arguments))
            }
        }
    }

    fn union_type(&self, members: &[Annotation]) -> Option<TypeRef> {
        let mut remaining = members
            .iter()
            .filter(|member| **member != Annotation::NoneLiteral);
        let only = remaining.next()?;
        if remaining.next().is_some() {
            return None;
        }
        self.type_from(only)
    }

    fn record_import(&mut self, parsed: &ParseResult, node: Node<'_>) {
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            match name.kind() {
                "dotted_name" => {
                    let dotted = parsed.text(name);
                    let head = dotted.split('.').next().unwrap_or(dotted);
                    self.imports
                        .insert(head.to_owned(), QualifiedName::new(head));
                }
                "aliased_import" => {
                    let (Some(target), Some(alias)) = (
                        name.child_by_field_name("name"),
                        name.child_by_field_name("alias"),
                    ) else {
                        continue;
                    };
                    self.imports.insert(
                        parsed.text(alias).to_owned(),
                        QualifiedName::new(parsed.text(target)),
                    );
                }
                _ => {}
            }
        }
    }

    fn record_from_import(&mut self, parsed: &ParseResult, node: Node<'_>) {
        let module = node
            .child_by_field_name("module_name")
            .map(|module| parsed.text(module).trim_start_matches('.'))
            .unwrap_or_default();
        let qualify = |name: &str| {
            if module.is_empty() {
                QualifiedName::new(name)
            } else {
                QualifiedName::new(format!("{module}.{name}"))
            }
        };

        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            match name.kind() {
                "dotted_name" => {
                    let imported = parsed.text(name);
                    let local = imported.rsplit('.').next().unwrap_or(imported);
                    self.imports.insert(local.to_owned(), qualify(imported));
                }
                "aliased_import" => {
                    let (Some(target), Some(alias)) = (
                        name.child_by_field_name("name"),
                        name.child_by_field_name("alias"),
                    ) else {
                        continue;
                    };
                    self.imports
                        .insert(parsed.text(alias).to_owned(), qualify(parsed.text(target)));
                }
                _ => {}
            }
        }
    }

    fn record_class_name(&mut self, parsed: &ParseResult, node: Node<'_>) {
        let qualified = self.class_name(parsed, node);
        let local = qualified
            .as_str()
            .strip_prefix(self.module.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(qualified.as_str())
            .to_owned();
        let simple = qualified.last_segment().to_owned();
        if local != simple {
            self.local_classes
                .entry(simple)
                .or_insert_with(|| qualified.clone());
        }
        self.local_classes.insert(local, qualified.clone());
        self.classes.entry(qualified).or_default();
    }

    fn record_class_body(&mut self, parsed: &ParseResult, node: Node<'_>) {
        let qualified = self.class_name(parsed, node);
        let bases = base_expressions(node)
            .into_iter()
            .filter_map(|base| self.annotation_type(parsed, base))
            .map(|base| base.name().clone())
            .collect();

        let mut methods = HashMap::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for statement in body.named_children(&mut cursor) {
                let Some(function) = unwrap_decorated(statement) else {
                    continue;
                };
                if let Some(name) = function.child_by_field_name("name") {
                    methods.insert(
                        parsed.text(name).to_owned(),
                        self.signature(parsed, function),
                    );
                }
            }
        }

        self.classes
            .insert(qualified, ClassInfo { bases, methods });
    }

    fn signature(&self, parsed: &ParseResult, function: Node<'_>) -> FunctionSignature {
        FunctionSignature {
            is_async: starts_with_async(function),
            returns: function
                .child_by_field_name("return_type")
                .and_then(|annotation| self.annotation_type(parsed, annotation)),
        }
    }
}

/// Returns the class whose body directly defines `function`.
pub(crate) fn enclosing_class(function: Node<'_>) -> Option<Node<'_>> {
    let mut parent = function.parent()?;
    if parent.kind() == "decorated_definition" {
        parent = parent.parent()?;
    }
    if parent.kind() != "block" {
        return None;
    }
    parent
        .parent()
        .filter(|class| class.kind() == "class_definition")
}

/// Returns `true` if `function` carries a `@staticmethod` decorator.
pub(crate) fn is_static_method(parsed: &ParseResult, function: Node<'_>) -> bool {
    let Some(decorated) = function
        .parent()
        .filter(|parent| parent.kind() == "decorated_definition")
    else {
        return false;
    };
    let mut cursor = decorated.walk();
    decorated
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .any(|decorator| parsed.text(decorator).contains("staticmethod"))
}

pub(crate) fn unwrap_decorated(statement: Node<'_>) -> Option<Node<'_>> {
    match statement.kind() {
        "function_definition" => Some(statement),
        "decorated_definition" => statement
            .child_by_field_name("definition")
            .filter(|definition| definition.kind() == "function_definition"),
        _ => None,
    }
}

fn base_expressions(class: Node<'_>) -> Vec<Node<'_>> {
    let Some(arguments) = class.child_by_field_name("superclasses") else {
        return Vec::new();
    };
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|argument| !matches!(argument.kind(), "keyword_argument" | "comment"))
        .collect()
}

fn simplify(name: QualifiedName, arguments: Vec<TypeRef>) -> TypeRef {
    let simplified = match (name.as_str(), arguments.as_slice()) {
        ("typing.Optional" | "typing.Annotated", [inner, ..]) => Some(inner.clone()),
        ("typing.Union", members) => {
            let mut remaining = members
                .iter()
                .filter(|member| member.name().as_str() != "builtins.None");
            match (remaining.next(), remaining.next()) {
                (Some(only), None) => Some(only.clone()),
                _ => None,
            }
        }
        ("typing.Coroutine" | "collections.abc.Coroutine", [_, _, result]) => Some(
            TypeRef::generic("typing.Awaitable", vec![result.clone()]),
        ),
        _ => None,
    };
    simplified.unwrap_or_else(|| TypeRef::generic(name, arguments))
}

fn normalise_module(name: QualifiedName) -> QualifiedName {
    match name.as_str().strip_prefix("typing_extensions.") {
        Some(rest) => QualifiedName::new(format!("typing.{rest}")),
        None => name,
    }
}
