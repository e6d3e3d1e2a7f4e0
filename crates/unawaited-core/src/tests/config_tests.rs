//! Tests for [`AnalysisConfig`].

use rstest::rstest;

use crate::{AnalysisConfig, DEFAULT_DISPOSAL_CAPABILITIES, DEFAULT_PENDING_TEMPLATES};

#[test]
fn default_config_uses_builtin_tables() {
    let config = AnalysisConfig::default();
    assert_eq!(config.pending_templates().len(), DEFAULT_PENDING_TEMPLATES.len());
    assert_eq!(
        config.disposal_capabilities().len(),
        DEFAULT_DISPOSAL_CAPABILITIES.len()
    );
    assert!(config.disabled_rules().is_empty());
}

#[rstest]
#[case("typing.Awaitable", true)]
#[case("collections.abc.Awaitable", true)]
#[case("asyncio.Future", true)]
#[case("asyncio.Task", true)]
#[case("typing.Coroutine", false)]
#[case("Awaitable", false)]
fn default_pending_templates(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(AnalysisConfig::default().is_pending_template(name), expected);
}

#[test]
fn extras_extend_without_duplicates() {
    let config = AnalysisConfig::default()
        .with_pending_templates(["trio.Future", "asyncio.Task", ""])
        .with_disposal_capabilities(["contextlib.AbstractAsyncContextManager"]);
    assert_eq!(
        config.pending_templates().len(),
        DEFAULT_PENDING_TEMPLATES.len() + 1
    );
    assert!(config.is_pending_template("trio.Future"));
    assert!(config.is_disposal_capability("contextlib.AbstractAsyncContextManager"));
    assert!(config.is_disposal_capability("typing.ContextManager"));
}

#[test]
fn disabled_rules_compare_case_insensitively() {
    let config = AnalysisConfig::default().with_disabled_rules(["uaw0001"]);
    assert!(!config.is_rule_enabled("UAW0001"));
    assert!(config.is_rule_enabled("UAW0002"));
}
