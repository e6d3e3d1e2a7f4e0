//! The analysis and fix pipeline.
//!
//! [`Engine`] parses a document once, builds a type oracle for it, and hands
//! both to every enabled rule. Fixes are routed back to the rule that
//! reported the finding by rule code.

use tracing::{debug, info};
use unawaited_core::{AnalysisConfig, Finding, Patch};
use unawaited_syntax::{BatchOutcome, ParseResult, PythonTypeOracle, SourceDocument, TypeOracle};

use crate::error::EngineError;
use crate::rule::{Rule, RuleContext, RuleRegistry};

/// Runs registered rules over documents and applies their fixes.
///
/// The engine holds no per-document state and is safe to share across
/// threads.
#[derive(Debug, Default)]
pub struct Engine {
    config: AnalysisConfig,
    registry: RuleRegistry,
}

impl Engine {
    /// Creates an engine with every built-in rule.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_registry(config, RuleRegistry::builtin())
    }

    /// Creates an engine over a custom rule registry.
    #[must_use]
    pub const fn with_registry(config: AnalysisConfig, registry: RuleRegistry) -> Self {
        Self { config, registry }
    }

    /// Returns the analysis configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Returns the rule registry.
    #[must_use]
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Iterates over the rules that are enabled by configuration.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.registry.iter().filter(|rule| {
            let metadata = rule.metadata();
            metadata.enabled_by_default && self.config.is_rule_enabled(metadata.code)
        })
    }

    /// Parses `document` and reports findings from every enabled rule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Syntax`] if the document cannot be parsed at
    /// all. Syntax errors inside the document are not fatal.
    pub fn analyze(&self, document: &SourceDocument) -> Result<Vec<Finding>, EngineError> {
        let parsed = document.parse()?;
        let oracle = PythonTypeOracle::new(&parsed).with_config(&self.config);
        Ok(self.analyze_with(&parsed, &oracle, document.uri()))
    }

    /// Reports findings for an already parsed document and its oracle.
    ///
    /// Findings are ordered by position, then by rule code.
    #[must_use]
    pub fn analyze_with(
        &self,
        parsed: &ParseResult,
        oracle: &dyn TypeOracle,
        uri: &str,
    ) -> Vec<Finding> {
        let context = RuleContext::new(parsed, oracle, &self.config, uri);
        let mut findings: Vec<Finding> = self
            .enabled_rules()
            .flat_map(|rule| rule.analyze(&context))
            .collect();
        findings.sort_by(|left, right| {
            left.span()
                .start_byte()
                .cmp(&right.span().start_byte())
                .then_with(|| left.rule_code().cmp(right.rule_code()))
        });
        debug!(uri, findings = findings.len(), "analysis finished");
        findings
    }

    /// Applies the fix for a single finding.
    ///
    /// The finding is routed to its rule by code. When the finding's location
    /// no longer holds anything to fix, the document is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownRule`] if no registered rule has the
    /// finding's code, or [`EngineError::Syntax`] if the document cannot be
    /// parsed or the rule's patch does not verify.
    pub fn fix(
        &self,
        document: &SourceDocument,
        finding: &Finding,
    ) -> Result<FixOutcome, EngineError> {
        let rule = self
            .registry
            .get(finding.rule_code())
            .ok_or_else(|| EngineError::unknown_rule(finding.rule_code()))?;

        let parsed = document.parse()?;
        let oracle = PythonTypeOracle::new(&parsed).with_config(&self.config);
        let context = RuleContext::new(&parsed, &oracle, &self.config, document.uri());

        let Some(patch) = rule.fix(&context, finding.span()) else {
            debug!(
                uri = document.uri(),
                rule = finding.rule_code(),
                "nothing to fix at finding location"
            );
            return Ok(FixOutcome::unchanged(document.clone()));
        };
        let patched = document.apply(&patch)?;
        Ok(FixOutcome {
            document: patched,
            patch: Some(patch),
        })
    }

    /// Fixes every finding of every enabled rule in one pass.
    ///
    /// All patches are computed against the same snapshot. Patches that
    /// overlap an earlier one are skipped and reported in the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Syntax`] if the document cannot be parsed or a
    /// patch does not verify.
    pub fn fix_all(&self, document: &SourceDocument) -> Result<BatchOutcome, EngineError> {
        self.fix_all_matching(document, &|_| true)
    }

    /// Fixes every finding of the rule with `code` in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownRule`] for an unregistered code, or
    /// the errors of [`Self::fix_all`].
    pub fn fix_all_for_rule(
        &self,
        document: &SourceDocument,
        code: &str,
    ) -> Result<BatchOutcome, EngineError> {
        let wanted = self
            .registry
            .get(code)
            .ok_or_else(|| EngineError::unknown_rule(code))?
            .metadata()
            .code;
        self.fix_all_matching(document, &|rule| rule.metadata().code == wanted)
    }

    fn fix_all_matching(
        &self,
        document: &SourceDocument,
        include: &dyn Fn(&dyn Rule) -> bool,
    ) -> Result<BatchOutcome, EngineError> {
        let parsed = document.parse()?;
        let oracle = PythonTypeOracle::new(&parsed).with_config(&self.config);
        let context = RuleContext::new(&parsed, &oracle, &self.config, document.uri());

        let patches: Vec<Patch> = self
            .enabled_rules()
            .filter(|rule| include(*rule))
            .flat_map(|rule| {
                rule.analyze(&context)
                    .into_iter()
                    .filter_map(move |finding| rule.fix(&context, finding.span()))
            })
            .collect();

        let outcome = document.apply_all(&patches)?;
        info!(
            uri = document.uri(),
            applied = outcome.applied().len(),
            skipped = outcome.skipped().len(),
            "batch fix finished"
        );
        Ok(outcome)
    }
}

/// Result of fixing a single finding.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    document: SourceDocument,
    patch: Option<Patch>,
}

impl FixOutcome {
    const fn unchanged(document: SourceDocument) -> Self {
        Self {
            document,
            patch: None,
        }
    }

    /// Returns the resulting document.
    #[must_use]
    pub const fn document(&self) -> &SourceDocument {
        &self.document
    }

    /// Consumes the outcome and returns the resulting document.
    #[must_use]
    pub fn into_document(self) -> SourceDocument {
        self.document
    }

    /// Returns the applied patch, or `None` when the fix was a no-op.
    #[must_use]
    pub const fn patch(&self) -> Option<&Patch> {
        self.patch.as_ref()
    }

    /// Returns `true` when the document was changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.patch.is_some()
    }
}
