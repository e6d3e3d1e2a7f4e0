//! Expression typing for [`PythonTypeOracle`].

use std::collections::{HashSet, VecDeque};

use tree_sitter::Node;

use super::PythonTypeOracle;
use super::index::{FunctionSignature, enclosing_class, is_static_method, unwrap_decorated};
use super::stdlib::{stdlib_call_result, stdlib_type};
use crate::traverse::{ancestors_and_self, nodes_of_kind};
use crate::types::{QualifiedName, TypeRef};

/// Maximum nesting of resolution steps for one query.
const MAX_DEPTH: usize = 16;

const TASK_FACTORIES: &[&str] = &["asyncio.create_task", "asyncio.ensure_future"];

impl PythonTypeOracle<'_> {
    pub(super) fn resolve_expression(&self, node: Node<'_>, depth: usize) -> Option<TypeRef> {
        if depth > MAX_DEPTH {
            return None;
        }
        let next = depth + 1;
        match node.kind() {
            "parenthesized_expression" => self.resolve_expression(node.named_child(0)?, next),
            "await" => {
                let awaited = self.resolve_expression(node.named_child(0)?, next)?;
                self.unwrap_pending(&awaited)
            }
            "call" => self.resolve_call(node, next),
            "identifier" => self.resolve_identifier(node, next),
            "attribute" => self.resolve_attribute(node, next),
            _ => None,
        }
    }

    fn text(&self, node: Node<'_>) -> &str {
        self.parsed.text(node)
    }

    fn resolve_call(&self, call: Node<'_>, depth: usize) -> Option<TypeRef> {
        let function = call.child_by_field_name("function")?;
        let arguments = call.child_by_field_name("arguments");
        match function.kind() {
            "identifier" => self.call_path(self.text(function), arguments, depth),
            "attribute" => {
                let object = function.child_by_field_name("object")?;
                let method = self.text(function.child_by_field_name("attribute")?);
                if let Some(receiver) = self.resolve_expression(object, depth) {
                    return self.call_method(receiver.name(), method);
                }
                let path = dotted_path(self.parsed.source(), function)?;
                self.call_path(path, arguments, depth)
            }
            _ => None,
        }
    }

    fn call_path(&self, path: &str, arguments: Option<Node<'_>>, depth: usize) -> Option<TypeRef> {
        let qualified = self.index.resolve_name(path);
        if TASK_FACTORIES.contains(&qualified.as_str()) {
            return self.resolve_task(arguments?, depth);
        }
        if self.index.class(&qualified).is_some() || stdlib_type(qualified.as_str()).is_some() {
            return Some(TypeRef::named(qualified));
        }
        if !path.contains('.') {
            if let Some(signature) = self.index.function(path) {
                return call_result(signature);
            }
        }
        if let Some(result) = stdlib_call_result(qualified.as_str()) {
            return Some(result);
        }
        let (owner, method) = path.rsplit_once('.')?;
        self.call_method(&self.index.resolve_name(owner), method)
    }

    fn resolve_task(&self, arguments: Node<'_>, depth: usize) -> Option<TypeRef> {
        let mut cursor = arguments.walk();
        let coroutine = arguments
            .named_children(&mut cursor)
            .find(|argument| !matches!(argument.kind(), "keyword_argument" | "comment"))?;
        let awaited = self.resolve_expression(coroutine, depth)?;
        let result = self.unwrap_pending(&awaited)?;
        Some(TypeRef::generic("asyncio.Task", vec![result]))
    }

    /// Looks `method` up on `owner` and its supertypes, nearest first.
    fn call_method(&self, owner: &QualifiedName, method: &str) -> Option<TypeRef> {
        let mut visited: HashSet<QualifiedName> = HashSet::new();
        let mut queue = VecDeque::from([owner.clone()]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(class) = self.index.class(&current) else {
                continue;
            };
            if let Some(signature) = class.methods.get(method) {
                return call_result(signature);
            }
            queue.extend(class.bases.iter().cloned());
        }
        None
    }

    fn resolve_identifier(&self, identifier: Node<'_>, depth: usize) -> Option<TypeRef> {
        let name = self.text(identifier);
        let function = ancestors_and_self(identifier)
            .skip(1)
            .find(|node| node.kind() == "function_definition");

        if let Some(function) = function {
            if let Some(parameter) = self.parameter_type(function, name) {
                return parameter;
            }
            let body = function.child_by_field_name("body")?;
            if let Some(found) =
                self.assigned_type(body, Some(function), name, identifier.start_byte(), depth)
            {
                return Some(found);
            }
            let module = ancestors_and_self(function).last()?;
            return self.assigned_type(module, None, name, usize::MAX, depth);
        }

        let module = ancestors_and_self(identifier).last()?;
        self.assigned_type(module, None, name, identifier.start_byte(), depth)
    }

    /// Returns `Some(type)` when `name` is a parameter of `function`; the
    /// inner value is `None` for an unannotated parameter.
    fn parameter_type(&self, function: Node<'_>, name: &str) -> Option<Option<TypeRef>> {
        let parameters = function.child_by_field_name("parameters")?;
        let mut cursor = parameters.walk();
        for (position, parameter) in parameters.named_children(&mut cursor).enumerate() {
            let (binding, annotation) = match parameter.kind() {
                "identifier" => (Some(parameter), None),
                "typed_parameter" => (
                    parameter.named_child(0),
                    parameter.child_by_field_name("type"),
                ),
                "default_parameter" => (parameter.child_by_field_name("name"), None),
                "typed_default_parameter" => (
                    parameter.child_by_field_name("name"),
                    parameter.child_by_field_name("type"),
                ),
                _ => (None, None),
            };
            if binding.is_none_or(|binding| self.text(binding) != name) {
                continue;
            }
            if let Some(annotation) = annotation {
                return Some(self.index.annotation_type(self.parsed, annotation));
            }
            let receiver = (position == 0)
                .then(|| enclosing_class(function))
                .flatten()
                .filter(|_| !is_static_method(self.parsed, function))
                .map(|class| TypeRef::named(self.index.class_name(self.parsed, class)));
            return Some(receiver);
        }
        None
    }

    /// Types the last assignment to `name` in `scope` that ends before
    /// `before`, ignoring assignments inside nested scopes.
    fn assigned_type(
        &self,
        scope: Node<'_>,
        owner: Option<Node<'_>>,
        name: &str,
        before: usize,
        depth: usize,
    ) -> Option<TypeRef> {
        let mut latest = None;
        for assignment in nodes_of_kind(scope, "assignment") {
            if assignment.start_byte() >= before {
                break;
            }
            if assignment.end_byte() > before || !in_scope(assignment, owner) {
                continue;
            }
            let Some(left) = assignment.child_by_field_name("left") else {
                continue;
            };
            if left.kind() == "identifier" && self.text(left) == name {
                latest = Some(assignment);
            }
        }

        self.assignment_type(latest?, depth)
    }

    fn assignment_type(&self, assignment: Node<'_>, depth: usize) -> Option<TypeRef> {
        if let Some(annotation) = assignment.child_by_field_name("type") {
            return self.index.annotation_type(self.parsed, annotation);
        }
        self.resolve_expression(assignment.child_by_field_name("right")?, depth)
    }

    /// Types `object.name` from the class of `object` and its bases,
    /// nearest first.
    fn resolve_attribute(&self, attribute: Node<'_>, depth: usize) -> Option<TypeRef> {
        let object = attribute.child_by_field_name("object")?;
        let name = self.text(attribute.child_by_field_name("attribute")?);
        let receiver = self.resolve_expression(object, depth)?;

        let mut visited: HashSet<QualifiedName> = HashSet::new();
        let mut queue = VecDeque::from([receiver.name().clone()]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(class) = self.index.class(&current) else {
                continue;
            };
            if let Some(found) = self
                .class_definition(&current)
                .and_then(|definition| self.member_type(definition, name, depth))
            {
                return Some(found);
            }
            queue.extend(class.bases.iter().cloned());
        }
        None
    }

    fn class_definition(&self, name: &QualifiedName) -> Option<Node<'_>> {
        nodes_of_kind(self.parsed.root_node(), "class_definition")
            .find(|class| self.index.class_name(self.parsed, *class) == *name)
    }

    /// A class-level declaration of `name` wins; otherwise the instance
    /// assignments in `__init__` are used, then those in other methods.
    fn member_type(&self, class: Node<'_>, name: &str, depth: usize) -> Option<TypeRef> {
        let body = class.child_by_field_name("body")?;
        let mut declared = None;
        let mut methods = Vec::new();
        let mut cursor = body.walk();
        for statement in body.named_children(&mut cursor) {
            if statement.kind() == "expression_statement" {
                declared = statement
                    .named_child(0)
                    .filter(|assignment| assignment.kind() == "assignment")
                    .filter(|assignment| {
                        assignment
                            .child_by_field_name("left")
                            .is_some_and(|left| left.kind() == "identifier" && self.text(left) == name)
                    })
                    .or(declared);
            } else {
                methods.extend(unwrap_decorated(statement));
            }
        }
        if let Some(assignment) = declared {
            return self.assignment_type(assignment, depth);
        }

        methods.sort_by_key(|method| {
            method
                .child_by_field_name("name")
                .is_none_or(|method_name| self.text(method_name) != "__init__")
        });
        methods
            .into_iter()
            .find_map(|method| self.instance_assignment(method, name, depth))
    }

    /// Types the last assignment to `<receiver>.name` made directly in
    /// `method`, where `<receiver>` is its first parameter.
    fn instance_assignment(&self, method: Node<'_>, name: &str, depth: usize) -> Option<TypeRef> {
        if is_static_method(self.parsed, method) {
            return None;
        }
        let receiver = self.text(first_parameter(method)?);
        let body = method.child_by_field_name("body")?;
        let assignment = nodes_of_kind(body, "assignment")
            .filter(|assignment| in_scope(*assignment, Some(method)))
            .filter(|assignment| {
                assignment
                    .child_by_field_name("left")
                    .is_some_and(|left| self.is_member(left, receiver, name))
            })
            .last()?;
        self.assignment_type(assignment, depth)
    }

    fn is_member(&self, node: Node<'_>, receiver: &str, name: &str) -> bool {
        node.kind() == "attribute"
            && node.child_by_field_name("object").is_some_and(|object| {
                object.kind() == "identifier" && self.text(object) == receiver
            })
            && node
                .child_by_field_name("attribute")
                .is_some_and(|attribute| self.text(attribute) == name)
    }
}

fn call_result(signature: &FunctionSignature) -> Option<TypeRef> {
    let returns = signature.returns.clone()?;
    if signature.is_async {
        Some(TypeRef::generic("typing.Awaitable", vec![returns]))
    } else {
        Some(returns)
    }
}

fn first_parameter(function: Node<'_>) -> Option<Node<'_>> {
    let parameter = function.child_by_field_name("parameters")?.named_child(0)?;
    match parameter.kind() {
        "identifier" => Some(parameter),
        "typed_parameter" => parameter.named_child(0),
        _ => None,
    }
}

/// Returns `true` when the nearest enclosing scope of `node` is `owner`
/// (`None` meaning module scope).
fn in_scope(node: Node<'_>, owner: Option<Node<'_>>) -> bool {
    let scope = ancestors_and_self(node).skip(1).find(|ancestor| {
        matches!(
            ancestor.kind(),
            "function_definition" | "class_definition" | "lambda"
        )
    });
    scope.map(|found| found.id()) == owner.map(|found| found.id())
}

/// Returns the source of an `identifier`/`attribute` chain such as
/// `asyncio.create_task`, or `None` for any other expression.
fn dotted_path<'src>(source: &'src str, node: Node<'_>) -> Option<&'src str> {
    let mut current = node;
    while current.kind() == "attribute" {
        current = current.child_by_field_name("object")?;
    }
    if current.kind() != "identifier" {
        return None;
    }
    source.get(node.byte_range())
}
