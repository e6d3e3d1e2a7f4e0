//! Integration tests for the `unawaited` binary entry point.
//!
//! Exercises exit codes, configuration flags placed before the subcommand,
//! and in-place fixing against files on disk.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const MISSING_AWAIT: &str = "\
import io
async def make() -> io.BytesIO: ...
async def main():
    with make() as b:
        pass
";

fn project() -> anyhow::Result<TempDir> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("app.py"), MISSING_AWAIT)?;
    fs::write(dir.path().join("notes.txt"), "with make() as b:\n")?;
    Ok(dir)
}

#[test]
fn check_reports_findings_with_exit_code_one() -> anyhow::Result<()> {
    let dir = project()?;
    let mut command = cargo_bin_cmd!("unawaited");
    command.args(["check", "--output", "human"]).arg(dir.path());
    command
        .assert()
        .code(1)
        .stdout(contains("warning[UAW0001]"))
        .stdout(contains("1 finding in 1 file checked"));
    Ok(())
}

#[test]
fn fix_writes_the_awaited_binding() -> anyhow::Result<()> {
    let dir = project()?;
    let mut command = cargo_bin_cmd!("unawaited");
    command.arg("fix").arg(dir.path());
    command.assert().success();

    let fixed = fs::read_to_string(dir.path().join("app.py"))?;
    assert!(fixed.contains("    with await make() as b:\n"));
    assert_eq!(
        fs::read_to_string(dir.path().join("notes.txt"))?,
        "with make() as b:\n"
    );
    Ok(())
}

#[test]
fn disabled_rule_from_config_file_silences_check() -> anyhow::Result<()> {
    let dir = project()?;
    let config = dir.path().join("unawaited.toml");
    fs::write(&config, "disabled_rules = [\"UAW0001\"]\n")?;

    let mut command = cargo_bin_cmd!("unawaited");
    command
        .arg("--config-path")
        .arg(&config)
        .args(["check", "--output", "json"])
        .arg(dir.path());
    command
        .assert()
        .success()
        .stdout(contains("\"findings\":[]"));
    Ok(())
}

#[test]
fn json_log_format_is_accepted_before_the_subcommand() {
    let mut command = cargo_bin_cmd!("unawaited");
    command.args(["--log-format", "json", "rules", "--output", "json"]);
    command
        .assert()
        .success()
        .stdout(contains("\"code\":\"UAW0001\"").and(contains("\"enabled\":true")));
}

#[test]
fn invalid_log_filter_fails_before_running() {
    let mut command = cargo_bin_cmd!("unawaited");
    command.args(["--log-filter", "unawaited=loud", "rules"]);
    command
        .assert()
        .code(2)
        .stderr(contains("invalid log filter"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let mut command = cargo_bin_cmd!("unawaited");
    command.assert().code(2).stderr(contains("Usage"));
}
