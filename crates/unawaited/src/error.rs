//! Error types for the analysis pipeline.

use thiserror::Error;
use unawaited_syntax::SyntaxError;

/// Errors raised by [`crate::Engine`].
///
/// Unresolvable types, malformed candidates and stale fix locations are not
/// errors; they produce no finding or an unchanged document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The document could not be parsed or a patch failed verification.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A finding named a rule that is not registered.
    #[error("no rule is registered for code '{code}'")]
    UnknownRule {
        /// The unrecognised rule code.
        code: String,
    },
}

impl EngineError {
    /// Creates an unknown rule error.
    #[must_use]
    pub fn unknown_rule(code: impl Into<String>) -> Self {
        Self::UnknownRule { code: code.into() }
    }
}
