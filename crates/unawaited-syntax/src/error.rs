//! Error types for parsing and document editing.
//!
//! Unresolvable types and malformed candidates are normal analysis outcomes
//! and never surface here; these errors cover parser setup, splice bounds,
//! and replacement text that fails to re-parse as the node it replaces.

use std::path::PathBuf;

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors from parsing and patch application.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Failed to determine language from file path.
    #[error("could not determine language for path: {}", path.display())]
    UnknownLanguage {
        /// The path that could not be mapped to a language.
        path: PathBuf,
    },

    /// Failed to parse source code.
    #[error("failed to parse {language}: {message}")]
    ParseError {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// A patch could not be spliced into the document.
    #[error("rewrite failed: {message}")]
    RewriteError {
        /// Description of the rewrite failure.
        message: String,
    },

    /// A spliced replacement did not re-parse as the node it replaced.
    #[error("unsound replacement for {kind} at bytes {start}..{end}: {message}")]
    UnsoundReplacement {
        /// Grammar kind of the replaced node.
        kind: String,
        /// Start byte of the replacement in the patched document.
        start: usize,
        /// End byte of the replacement in the patched document.
        end: usize,
        /// What the re-parse found instead.
        message: String,
    },

    /// Internal error indicating a bug or system failure.
    #[error("internal error: {message}")]
    InternalError {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates an unknown language error.
    #[must_use]
    pub const fn unknown_language(path: PathBuf) -> Self {
        Self::UnknownLanguage { path }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            message: message.into(),
        }
    }

    /// Creates a rewrite error.
    #[must_use]
    pub fn rewrite(message: impl Into<String>) -> Self {
        Self::RewriteError {
            message: message.into(),
        }
    }

    /// Creates an unsound replacement error.
    #[must_use]
    pub fn unsound_replacement(
        kind: impl Into<String>,
        range: std::ops::Range<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnsoundReplacement {
            kind: kind.into(),
            start: range.start,
            end: range.end,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
