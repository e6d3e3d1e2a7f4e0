//! BDD step definitions for the CLI behavioural tests.
//!
//! These steps map scenarios in `tests/features/unawaited_cli.feature` to
//! in-process runs against a scratch directory.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::support::{MISSING_AWAIT, TestWorld};

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

#[given("a source file {name} that binds a pending computation")]
fn given_pending_source(world: &RefCell<TestWorld>, name: String) {
    world.borrow().write(name.trim_matches('"'), MISSING_AWAIT);
}

#[when("the operator runs {command}")]
fn when_operator_runs(world: &RefCell<TestWorld>, command: String) {
    world.borrow_mut().run(command.trim_matches('"'));
}

#[then("the CLI exits with code {status}")]
fn then_exit_code(world: &RefCell<TestWorld>, status: u8) {
    world.borrow().assert_exit_code(status);
}

#[then("stdout contains {snippet}")]
fn then_stdout_contains(world: &RefCell<TestWorld>, snippet: String) {
    let world = world.borrow();
    let stdout = world.stdout_text();
    let snippet = snippet.trim_matches('"');
    assert!(
        stdout.contains(snippet),
        "stdout {stdout:?} did not contain {snippet:?}"
    );
}

#[then("the file {name} contains {snippet}")]
fn then_file_contains(world: &RefCell<TestWorld>, name: String, snippet: String) {
    let content = world.borrow().read(name.trim_matches('"'));
    let snippet = snippet.trim_matches('"');
    assert!(
        content.contains(snippet),
        "file {content:?} did not contain {snippet:?}"
    );
}

#[scenario(
    path = "tests/features/unawaited_cli.feature",
    name = "A missing await is reported with its location"
)]
fn missing_await_is_reported(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/unawaited_cli.feature",
    name = "Fixing rewrites the file and a second check is clean"
)]
fn fix_then_check_is_clean(world: RefCell<TestWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/unawaited_cli.feature",
    name = "A dry run reports fixes without writing"
)]
fn dry_run_does_not_write(world: RefCell<TestWorld>) {
    let _ = world;
}
