//! Analysis configuration: pending templates, capabilities, and rule toggles.

/// Fully-qualified generic templates treated as pending computations.
pub const DEFAULT_PENDING_TEMPLATES: &[&str] = &[
    "typing.Awaitable",
    "collections.abc.Awaitable",
    "asyncio.Future",
    "asyncio.Task",
];

/// Fully-qualified names that mark a type as disposable.
pub const DEFAULT_DISPOSAL_CAPABILITIES: &[&str] = &[
    "contextlib.AbstractContextManager",
    "typing.ContextManager",
];

/// Configuration shared by every rule in one analysis run.
///
/// # Defaults
///
/// - `pending_templates`: [`DEFAULT_PENDING_TEMPLATES`]
/// - `disposal_capabilities`: [`DEFAULT_DISPOSAL_CAPABILITIES`]
/// - `disabled_rules`: empty
///
/// # Example
///
/// ```
/// use unawaited_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default()
///     .with_pending_templates(["trio.Future"])
///     .with_disabled_rules(["UAW0001"]);
/// assert!(config.is_pending_template("asyncio.Task"));
/// assert!(config.is_pending_template("trio.Future"));
/// assert!(!config.is_rule_enabled("UAW0001"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Templates whose single type argument is the eventual result.
    pending_templates: Vec<String>,
    /// Names marking the disposal capability.
    disposal_capabilities: Vec<String>,
    /// Rule codes that must not run.
    disabled_rules: Vec<String>,
}

impl AnalysisConfig {
    /// Returns the pending-computation templates.
    #[must_use]
    pub fn pending_templates(&self) -> &[String] {
        &self.pending_templates
    }

    /// Returns the disposal capability names.
    #[must_use]
    pub fn disposal_capabilities(&self) -> &[String] {
        &self.disposal_capabilities
    }

    /// Returns the disabled rule codes.
    #[must_use]
    pub fn disabled_rules(&self) -> &[String] {
        &self.disabled_rules
    }

    /// Adds pending-computation templates, ignoring duplicates.
    #[must_use]
    pub fn with_pending_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.pending_templates, templates);
        self
    }

    /// Adds disposal capability names, ignoring duplicates.
    #[must_use]
    pub fn with_disposal_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.disposal_capabilities, capabilities);
        self
    }

    /// Disables the given rule codes.
    #[must_use]
    pub fn with_disabled_rules<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.disabled_rules, codes);
        self
    }

    /// Returns `true` if `name` is a configured pending template.
    #[must_use]
    pub fn is_pending_template(&self, name: &str) -> bool {
        self.pending_templates.iter().any(|t| t == name)
    }

    /// Returns `true` if `name` is a configured disposal capability.
    #[must_use]
    pub fn is_disposal_capability(&self, name: &str) -> bool {
        self.disposal_capabilities.iter().any(|c| c == name)
    }

    /// Returns `true` unless `code` is disabled. Codes compare
    /// case-insensitively.
    #[must_use]
    pub fn is_rule_enabled(&self, code: &str) -> bool {
        !self
            .disabled_rules
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(code))
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pending_templates: to_owned_list(DEFAULT_PENDING_TEMPLATES),
            disposal_capabilities: to_owned_list(DEFAULT_DISPOSAL_CAPABILITIES),
            disabled_rules: Vec::new(),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn extend_unique<I, S>(target: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for item in items {
        let owned: String = item.into();
        if !owned.is_empty() && !target.contains(&owned) {
            target.push(owned);
        }
    }
}
