//! The rule abstraction and the registry that routes work to rules.

use std::collections::BTreeMap;
use std::fmt;

use unawaited_core::{AnalysisConfig, Finding, Patch, RuleMetadata, Span};
use unawaited_syntax::{ParseResult, TypeOracle};

use crate::rules;

/// An analysis rule with an optional structural fix.
///
/// Rules are stateless; everything they need about the document arrives in
/// the [`RuleContext`]. They must be safe to share across worker threads.
pub trait Rule: Send + Sync {
    /// Returns the rule's descriptor.
    fn metadata(&self) -> &RuleMetadata;

    /// Reports every site in the document that exhibits the defect.
    ///
    /// Sites whose types cannot be resolved produce no finding.
    fn analyze(&self, context: &RuleContext<'_>) -> Vec<Finding>;

    /// Builds a patch for the finding reported at `span`.
    ///
    /// Returns `None` when nothing at `span` needs fixing any more, for
    /// example because the document changed since the finding was reported.
    fn fix(&self, context: &RuleContext<'_>, span: &Span) -> Option<Patch>;
}

/// Everything a rule may query about one parsed document.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    parsed: &'a ParseResult,
    oracle: &'a dyn TypeOracle,
    config: &'a AnalysisConfig,
    uri: &'a str,
}

impl<'a> RuleContext<'a> {
    /// Creates a context over a parsed document and its type oracle.
    #[must_use]
    pub const fn new(
        parsed: &'a ParseResult,
        oracle: &'a dyn TypeOracle,
        config: &'a AnalysisConfig,
        uri: &'a str,
    ) -> Self {
        Self {
            parsed,
            oracle,
            config,
            uri,
        }
    }

    /// Returns the parsed document.
    #[must_use]
    pub const fn parsed(&self) -> &'a ParseResult {
        self.parsed
    }

    /// Returns the type oracle for the document.
    #[must_use]
    pub const fn oracle(&self) -> &'a dyn TypeOracle {
        self.oracle
    }

    /// Returns the analysis configuration.
    #[must_use]
    pub const fn config(&self) -> &'a AnalysisConfig {
        self.config
    }

    /// Returns the URI findings are reported against.
    #[must_use]
    pub const fn uri(&self) -> &'a str {
        self.uri
    }
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("uri", &self.uri)
            .field("language", &self.parsed.language())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Registered rules keyed by rule code.
///
/// Iteration is ordered by code so output is stable across runs.
pub struct RuleRegistry {
    rules: BTreeMap<&'static str, Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Creates a registry holding every built-in rule.
    #[must_use]
    pub fn builtin() -> Self {
        rules::builtin()
            .into_iter()
            .fold(Self::empty(), |registry, rule| registry.with_rule(rule))
    }

    /// Registers `rule`, replacing any rule with the same code.
    #[must_use]
    pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.register(rule);
        self
    }

    /// Registers `rule`, returning the rule it replaced, if any.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Option<Box<dyn Rule>> {
        let code = rule.metadata().code;
        self.rules.insert(code, rule)
    }

    /// Looks a rule up by code, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|(registered, _)| registered.eq_ignore_ascii_case(code))
            .map(|(_, rule)| rule.as_ref())
    }

    /// Iterates over the registered rules in code order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.values().map(AsRef::as_ref)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.keys()).finish()
    }
}
