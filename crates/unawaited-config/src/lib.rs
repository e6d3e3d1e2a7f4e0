//! Layered configuration for the unawaited toolchain.
//!
//! [`Config`] is loaded with `ortho_config`, which merges, from lowest to
//! highest precedence: built-in defaults, a TOML file (`--config-path` or
//! `UNAWAITED_CONFIG_PATH`), `UNAWAITED_*` environment variables, and
//! command-line flags.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use unawaited_core::AnalysisConfig;

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration shared by the CLI and the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "UNAWAITED")]
pub struct Config {
    /// Tracing filter expression, e.g. `info` or `unawaited=debug`.
    #[ortho_config(default = default_log_filter_string())]
    log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
    /// Rule codes that must not run.
    #[serde(default)]
    disabled_rules: Vec<String>,
    /// Fully-qualified generic types to treat as pending computations in
    /// addition to the built-in set.
    #[serde(default)]
    extra_pending_templates: Vec<String>,
    /// Fully-qualified types that mark a value as disposable in addition to
    /// the built-in set.
    #[serde(default)]
    extra_disposal_capabilities: Vec<String>,
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the rule codes disabled by configuration.
    #[must_use]
    pub fn disabled_rules(&self) -> &[String] {
        &self.disabled_rules
    }

    /// Returns the configured extra pending-computation templates.
    #[must_use]
    pub fn extra_pending_templates(&self) -> &[String] {
        &self.extra_pending_templates
    }

    /// Returns the configured extra disposal capabilities.
    #[must_use]
    pub fn extra_disposal_capabilities(&self) -> &[String] {
        &self.extra_disposal_capabilities
    }

    /// Builds the analysis configuration: the built-in templates and
    /// capabilities extended with the configured extras.
    #[must_use]
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::default()
            .with_pending_templates(&self.extra_pending_templates)
            .with_disposal_capabilities(&self.extra_disposal_capabilities)
            .with_disabled_rules(&self.disabled_rules)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            disabled_rules: Vec::new(),
            extra_pending_templates: Vec::new(),
            extra_disposal_capabilities: Vec::new(),
        }
    }
}
