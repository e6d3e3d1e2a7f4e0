//! Tests for [`Finding`], [`Severity`], and [`RuleMetadata`].

use rstest::rstest;

use crate::{Finding, LineCol, RuleCategory, RuleMetadata, Severity, Span};

fn sample_finding() -> Finding {
    Finding::new(
        "UAW0001",
        "file:///app.py",
        Span::new(120, 158, LineCol::new(12, 16), LineCol::new(12, 54)),
        String::from("await is missing"),
        Severity::Warning,
    )
}

#[rstest]
#[case("info", Severity::Info)]
#[case("warning", Severity::Warning)]
#[case("WARN", Severity::Warning)]
#[case(" error ", Severity::Error)]
fn severity_parses_known_names(#[case] input: &str, #[case] expected: Severity) {
    assert_eq!(input.parse::<Severity>(), Ok(expected));
}

#[test]
fn severity_rejects_unknown_names() {
    let err = "fatal".parse::<Severity>().expect_err("should fail");
    assert_eq!(err.to_string(), "unknown severity: 'fatal'");
}

#[test]
fn findings_with_same_code_and_span_share_a_key() {
    let first = sample_finding();
    let second = sample_finding().with_severity(Severity::Error);
    assert!(first.is_same_site(&second));
    assert_ne!(first, second);
}

#[test]
fn finding_display_uses_one_based_position() {
    insta::assert_snapshot!(
        sample_finding().to_string(),
        @"file:///app.py:13:17: warning[UAW0001]: await is missing"
    );
}

#[test]
fn finding_serializes_severity_in_lower_case() {
    let json = serde_json::to_value(sample_finding()).expect("serialize");
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["rule_code"], "UAW0001");
    assert_eq!(json["span"]["start"]["line"], 12);
}

#[test]
fn metadata_without_fix_has_no_equivalence_key() {
    let meta = RuleMetadata {
        code: "UAW9999",
        name: "report-only",
        title: "Report only",
        description: "A rule without a fix.",
        category: RuleCategory::Correctness,
        default_severity: Severity::Info,
        enabled_by_default: false,
        fix_title: None,
    };
    assert!(!meta.is_fixable());
    assert_eq!(meta.fix_equivalence_key(), None);
    assert_eq!(meta.category.to_string(), "correctness");
}
