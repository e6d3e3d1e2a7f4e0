//! In-process tests for command dispatch, exit codes, and output.

use rstest::{fixture, rstest};
use serde_json::Value;

use super::support::{AWAITED, MISSING_AWAIT, TestWorld};

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

#[rstest]
fn check_with_findings_exits_with_one(mut world: TestWorld) {
    world.write("app.py", MISSING_AWAIT);

    world.run("check $DIR --output human");

    world.assert_exit_code(1);
    let stdout = world.stdout_text();
    assert!(stdout.contains("warning[UAW0001]"), "{stdout}");
    assert!(stdout.contains("'with make() as b:'"), "{stdout}");
    assert!(stdout.ends_with("1 finding in 1 file checked\n"), "{stdout}");
}

#[rstest]
fn clean_check_exits_with_zero(mut world: TestWorld) {
    world.write("app.py", AWAITED);

    world.run("check $DIR --output human");

    world.assert_exit_code(0);
    assert_eq!(world.stdout_text(), "0 findings in 1 file checked\n");
}

#[rstest]
fn check_emits_json_when_not_on_a_terminal(mut world: TestWorld) {
    world.write("pkg/app.py", MISSING_AWAIT);
    world.write("pkg/clean.py", AWAITED);

    world.run("check $DIR");

    let report: Value = serde_json::from_str(&world.stdout_text()).expect("json report");
    assert_eq!(report["files_checked"], 2);
    let findings = report["findings"].as_array().expect("findings array");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["rule_code"], "UAW0001");
    assert_eq!(findings[0]["severity"], "warning");
    assert_eq!(findings[0]["span"]["start"]["line"], 3);
}

#[rstest]
fn unreadable_file_is_reported_and_others_still_checked(mut world: TestWorld) {
    world.write("app.py", MISSING_AWAIT);
    std::fs::write(world.root().join("broken.py"), b"\xff\xfe\x00").expect("write bytes");

    world.run("check $DIR --output json");

    world.assert_exit_code(2);
    assert!(world.stderr_text().contains("failed to read"));
    let report: Value = serde_json::from_str(&world.stdout_text()).expect("json report");
    assert_eq!(report["findings"].as_array().map(Vec::len), Some(1));
}

#[rstest]
fn missing_path_is_an_error(mut world: TestWorld) {
    world.run("check $DIR/missing");

    world.assert_exit_code(2);
    assert!(world.stderr_text().contains("failed to walk"));
}

#[rstest]
fn fix_rewrites_files_in_place(mut world: TestWorld) {
    world.write("app.py", MISSING_AWAIT);

    world.run("fix $DIR --output human");

    world.assert_exit_code(0);
    assert_eq!(world.read("app.py"), AWAITED);
    assert!(world.stdout_text().ends_with("1 fix applied across 1 file\n"));
}

#[rstest]
fn fix_leaves_synchronous_functions_unchanged(mut world: TestWorld) {
    let source = MISSING_AWAIT.replace("async def main", "def main");
    world.write("app.py", &source);

    world.run("fix $DIR --output human");

    world.assert_exit_code(0);
    assert_eq!(world.read("app.py"), source);
    assert_eq!(world.stdout_text(), "0 fixes applied across 0 files\n");

    world.run("check $DIR --output human");
    world.assert_exit_code(1);
}

#[rstest]
fn dry_run_leaves_files_untouched(mut world: TestWorld) {
    world.write("app.py", MISSING_AWAIT);

    world.run("fix --dry-run $DIR --output json");

    world.assert_exit_code(0);
    assert_eq!(world.read("app.py"), MISSING_AWAIT);
    let report: Value = serde_json::from_str(&world.stdout_text()).expect("json report");
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["files"][0]["applied"], 1);
    assert_eq!(report["files"][0]["written"], false);
}

#[rstest]
fn fix_then_check_is_clean(mut world: TestWorld) {
    world.write("app.py", MISSING_AWAIT);

    world.run("fix $DIR");
    world.run("check $DIR");

    world.assert_exit_code(0);
}

#[rstest]
fn rules_lists_the_builtin_rule(mut world: TestWorld) {
    world.run("rules --output human");

    world.assert_exit_code(0);
    assert_eq!(
        world.stdout_text(),
        "UAW0001 with-missing-await [warning, usage, fixable]\n    Await is missing in with statement\n"
    );
}

#[rstest]
#[case::no_subcommand("")]
#[case::unknown_subcommand("lint $DIR")]
#[case::check_without_paths("check")]
fn usage_errors_exit_with_two(mut world: TestWorld, #[case] command: &str) {
    world.run(command);

    world.assert_exit_code(2);
    assert!(world.stdout_text().is_empty());
    assert!(!world.stderr_text().is_empty());
}

#[rstest]
fn help_goes_to_stdout(mut world: TestWorld) {
    world.run("--help");

    world.assert_exit_code(0);
    assert!(world.stdout_text().contains("Usage: unawaited"));
}
