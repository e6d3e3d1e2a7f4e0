//! Unit tests for the Python type oracle.

use rstest::rstest;

use super::PythonTypeOracle;
use crate::traverse::nodes_of_kind;
use crate::types::{QualifiedName, TypeOracle};
use crate::{ParseResult, Parser, SupportedLanguage};

fn parse(source: &str) -> ParseResult {
    Parser::new(SupportedLanguage::Python)
        .expect("parser")
        .parse(source)
        .expect("parse")
}

/// Resolves the last bare expression statement in `source`.
fn type_of_last_expression(source: &str) -> Option<String> {
    let parsed = parse(source);
    let oracle = PythonTypeOracle::for_module(&parsed, "app");
    let statement = nodes_of_kind(parsed.root_node(), "expression_statement")
        .last()
        .expect("expression statement");
    let expression = statement.named_child(0).expect("expression");
    oracle.resolve_type(expression).map(|ty| ty.to_string())
}

const CONN: &str = "\
from contextlib import AbstractContextManager
from typing import Awaitable
import asyncio

class Conn(AbstractContextManager):
    def close(self) -> None: ...

async def open_conn() -> Conn: ...
def open_later() -> Awaitable[Conn]: ...
def open_now() -> 'Conn': ...
";

#[rstest]
#[case("open_conn()", Some("typing.Awaitable[app.Conn]"))]
#[case("open_later()", Some("typing.Awaitable[app.Conn]"))]
#[case("open_now()", Some("app.Conn"))]
#[case("Conn()", Some("app.Conn"))]
#[case("await open_conn()", Some("app.Conn"))]
#[case("(open_later())", Some("typing.Awaitable[app.Conn]"))]
#[case("asyncio.create_task(open_conn())", Some("asyncio.Task[app.Conn]"))]
#[case("asyncio.ensure_future(open_later())", Some("asyncio.Task[app.Conn]"))]
#[case("missing()", None)]
#[case("open_conn() or None", None)]
fn resolves_module_level_calls(#[case] expression: &str, #[case] expected: Option<&str>) {
    let source = format!("{CONN}\n{expression}\n");
    assert_eq!(type_of_last_expression(&source).as_deref(), expected);
}

#[test]
fn resolves_methods_through_base_classes() {
    let source = "\
import typing

class Base:
    async def acquire(self) -> 'Lease': ...

class Pool(Base):
    pass

class Lease:
    def __enter__(self): ...
    def __exit__(self, *exc): ...

def use(pool: Pool):
    pool.acquire()
";
    assert_eq!(
        type_of_last_expression(source).as_deref(),
        Some("typing.Awaitable[app.Lease]")
    );
}

#[test]
fn resolves_self_inside_methods() {
    let source = "\
class Client:
    async def connect(self) -> 'Client': ...

    def run(self):
        self.connect()
";
    assert_eq!(
        type_of_last_expression(source).as_deref(),
        Some("typing.Awaitable[app.Client]")
    );
}

#[test]
fn resolves_preceding_assignments_in_function_scope() {
    let source = "\
import io

def work():
    buffer = io.StringIO()
    other: io.BytesIO
    buffer
";
    assert_eq!(
        type_of_last_expression(source).as_deref(),
        Some("io.StringIO")
    );
}

#[test]
fn ignores_assignments_after_the_use() {
    let source = "\
import io

def work():
    buffer
    buffer = io.StringIO()
";
    let parsed = parse(source);
    let oracle = PythonTypeOracle::new(&parsed);
    let statement = nodes_of_kind(parsed.root_node(), "expression_statement")
        .find(|node| parsed.text(*node) == "buffer")
        .expect("bare use");
    let expression = statement.named_child(0).expect("identifier");
    assert_eq!(oracle.resolve_type(expression), None);
}

#[test]
fn self_referential_assignment_terminates() {
    let source = "\
def work():
    value = value
    value
";
    assert_eq!(type_of_last_expression(source), None);
}

#[test]
fn resolves_import_aliases_and_optional_annotations() {
    let source = "\
import typing as t
from asyncio import Future as Fut

def fetch() -> t.Optional[Fut[int]]: ...

fetch()
";
    assert_eq!(
        type_of_last_expression(source).as_deref(),
        Some("asyncio.Future[builtins.int]")
    );
}

#[test]
fn stdlib_functions_have_known_results() {
    assert_eq!(
        type_of_last_expression("open('data.txt')\n").as_deref(),
        Some("typing.IO")
    );
}

#[test]
fn supertypes_and_members_cover_local_and_stdlib_types() {
    let parsed = parse(CONN);
    let oracle = PythonTypeOracle::for_module(&parsed, "app");

    assert_eq!(
        oracle.supertypes(&QualifiedName::new("app.Conn")),
        vec![QualifiedName::new("contextlib.AbstractContextManager")]
    );
    assert_eq!(
        oracle.declared_members(&QualifiedName::new("app.Conn")),
        vec![String::from("close")]
    );
    assert_eq!(
        oracle.declared_members(&QualifiedName::new("contextlib.AbstractContextManager")),
        vec![String::from("__enter__"), String::from("__exit__")]
    );
    assert!(
        oracle
            .supertypes(&QualifiedName::new("app.Unknown"))
            .is_empty()
    );
}

#[test]
fn nested_classes_are_qualified_by_their_outer_class() {
    let source = "\
class Outer:
    class Inner:
        pass

Outer.Inner()
";
    assert_eq!(
        type_of_last_expression(source).as_deref(),
        Some("app.Outer.Inner")
    );
}

#[rstest]
#[case::assigned_in_init(
    "\
import asyncio
class Service:
    def __init__(self):
        self.pending = asyncio.create_task(open_conn())

    def run(self):
        self.pending
"
)]
#[case::declared_on_the_class(
    "\
import asyncio
class Service:
    pending: asyncio.Task[Conn]

    def run(self):
        self.pending
"
)]
#[case::assigned_in_another_method(
    "\
import asyncio
class Service:
    def start(this):
        this.pending = asyncio.ensure_future(open_conn())

    def run(self):
        self.pending
"
)]
#[case::inherited_from_a_base(
    "\
import asyncio
class Base:
    def __init__(self, pending: 'asyncio.Task[Conn]'):
        self.pending = pending

class Service(Base):
    def run(self):
        self.pending
"
)]
fn resolves_instance_attributes(#[case] class: &str) {
    let source = format!("{CONN}\n{class}");
    assert_eq!(
        type_of_last_expression(&source).as_deref(),
        Some("asyncio.Task[app.Conn]")
    );
}

#[rstest]
#[case::unknown_attribute(
    "class Service:\n    def __init__(self):\n        self.ready = True\n\n    def run(self):\n        self.pending\n"
)]
#[case::assigned_in_a_nested_function(
    "class Service:\n    def __init__(self):\n        def later():\n            self.pending = open_conn()\n\n    def run(self):\n        self.pending\n"
)]
#[case::self_referential(
    "class Service:\n    def __init__(self):\n        self.pending = self.pending\n\n    def run(self):\n        self.pending\n"
)]
fn leaves_untyped_attributes_unresolved(#[case] class: &str) {
    let source = format!("{CONN}\n{class}");
    assert_eq!(type_of_last_expression(&source), None);
}

#[test]
fn string_annotations_are_read_as_expressions() {
    let source = "\
import typing

class Conn:
    pass

def later() -> 'typing.Awaitable[\"Conn\"]': ...

later()
";
    assert_eq!(
        type_of_last_expression(source).as_deref(),
        Some("typing.Awaitable[app.Conn]")
    );
}
