//! Static rule descriptions.

use std::fmt;

use serde::Serialize;

use crate::finding::Severity;

/// Broad grouping of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// API misuse that compiles but behaves incorrectly.
    Usage,
    /// Likely logic errors.
    Correctness,
    /// Naming and formatting conventions.
    Style,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Usage => "usage",
            Self::Correctness => "correctness",
            Self::Style => "style",
        })
    }
}

/// Static metadata describing a rule and its fix.
///
/// # Example
///
/// ```
/// use unawaited_core::{RuleCategory, RuleMetadata, Severity};
///
/// let meta = RuleMetadata {
///     code: "UAW0001",
///     name: "with-missing-await",
///     title: "Missing await in with statement",
///     description: "Binding a pending computation disposes the handle.",
///     category: RuleCategory::Usage,
///     default_severity: Severity::Warning,
///     enabled_by_default: true,
///     fix_title: Some("Add missing await"),
/// };
/// assert_eq!(meta.fix_equivalence_key().as_deref(), Some("UAW0001-CodeFix"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMetadata {
    /// Stable rule code, e.g. `UAW0001`.
    pub code: &'static str,
    /// Kebab-case rule name.
    pub name: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Longer explanation of the defect.
    pub description: &'static str,
    /// Category the rule belongs to.
    pub category: RuleCategory,
    /// Severity used when reporting findings.
    pub default_severity: Severity,
    /// Whether the rule runs unless explicitly disabled.
    pub enabled_by_default: bool,
    /// Title of the fix action, when the rule offers one.
    pub fix_title: Option<&'static str>,
}

impl RuleMetadata {
    /// Returns `true` when the rule offers an automated fix.
    #[must_use]
    pub const fn is_fixable(&self) -> bool {
        self.fix_title.is_some()
    }

    /// Returns the key grouping equivalent fix actions for batch fixing.
    #[must_use]
    pub fn fix_equivalence_key(&self) -> Option<String> {
        self.fix_title.map(|_| format!("{}-CodeFix", self.code))
    }
}
