//! Finding types produced by rule analysis.
//!
//! A [`Finding`] is one reported instance of a defect pattern at a specific
//! source location. Findings are immutable, live for a single analysis run,
//! and are identified structurally by their rule code and span.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::span::Span;

/// How strongly a finding should be surfaced.
///
/// # Example
///
/// ```
/// use unawaited_core::Severity;
///
/// assert_eq!(Severity::Warning.to_string(), "warning");
/// assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational note.
    Info,
    /// Likely defect; the default for rules in this crate family.
    Warning,
    /// Definite defect.
    Error,
}

impl Severity {
    /// Returns the lower-case identifier for this severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a severity name fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown severity: '{0}'")]
pub struct SeverityParseError(String);

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(SeverityParseError(other.to_owned())),
        }
    }
}

/// Structural identity of a finding within one analysis run.
pub type FindingKey<'a> = (&'a str, &'a Span);

/// One reported defect instance.
///
/// # Example
///
/// ```
/// use unawaited_core::{Finding, LineCol, Severity, Span};
///
/// let span = Span::new(0, 8, LineCol::new(0, 0), LineCol::new(0, 8));
/// let finding = Finding::new(
///     "UAW0001",
///     "file:///app.py",
///     span.clone(),
///     String::from("message"),
///     Severity::Warning,
/// );
/// assert_eq!(finding.key(), ("UAW0001", &span));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Code of the rule that produced this finding.
    rule_code: String,
    /// URI of the analysed document.
    uri: String,
    /// Exact span of the construct that triggered the rule.
    span: Span,
    /// Human-readable message, usually embedding the flagged source text.
    message: String,
    /// Reporting severity.
    severity: Severity,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        rule_code: impl Into<String>,
        uri: impl Into<String>,
        span: Span,
        message: String,
        severity: Severity,
    ) -> Self {
        Self {
            rule_code: rule_code.into(),
            uri: uri.into(),
            span,
            message,
            severity,
        }
    }

    /// Returns the code of the rule that produced this finding.
    #[must_use]
    pub fn rule_code(&self) -> &str {
        &self.rule_code
    }

    /// Returns the URI of the analysed document.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the span of the flagged construct.
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }

    /// Returns the finding message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the reporting severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns a copy of this finding reported at a different severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the `(rule_code, span)` pair identifying this finding.
    #[must_use]
    pub fn key(&self) -> FindingKey<'_> {
        (self.rule_code.as_str(), &self.span)
    }

    /// Returns `true` when `other` was reported by the same rule at the same
    /// span, regardless of message or severity.
    #[must_use]
    pub fn is_same_site(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}]: {}",
            self.uri,
            self.span.start(),
            self.severity,
            self.rule_code,
            self.message
        )
    }
}
