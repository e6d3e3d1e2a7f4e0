//! Syntactic validation of rewritten documents before they are persisted.
//!
//! A fix that produces a document with syntax errors anywhere in it is
//! rejected before it reaches disk, even when every individual patch verified
//! on its own.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::Path;
use std::sync::Mutex;

use crate::document::SourceDocument;
use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::Parser;

/// Validates that documents parse without errors.
///
/// Parsers are created lazily per language and cached behind a mutex, so a
/// single lock can be shared across worker threads.
pub struct SyntacticLock {
    parsers: Mutex<HashMap<SupportedLanguage, Parser>>,
}

impl SyntacticLock {
    /// Creates a new syntactic lock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Mutex::new(HashMap::new()),
        }
    }

    /// Validates a document, returning every syntax error it contains.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be initialised or the internal
    /// parser cache is poisoned.
    pub fn validate(&self, document: &SourceDocument) -> Result<Vec<ValidationFailure>, SyntaxError> {
        let language = document.language();
        let mut parsers = self
            .parsers
            .lock()
            .map_err(|_| SyntaxError::parser_init(language, "lock poisoned"))?;

        let parser = match parsers.entry(language) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Parser::new(language)?),
        };

        let result = parser.parse(document.source())?;
        Ok(result
            .errors()
            .into_iter()
            .map(|error| ValidationFailure {
                uri: document.uri().to_owned(),
                line: error.line,
                column: error.column,
                message: error.message,
            })
            .collect())
    }

    /// Validates file content, detecting the language from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownLanguage`] for unsupported extensions,
    /// or any error from [`Self::validate`].
    pub fn validate_file(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<ValidationFailure>, SyntaxError> {
        let language = SupportedLanguage::from_path(path)
            .ok_or_else(|| SyntaxError::unknown_language(path.to_path_buf()))?;
        let document = SourceDocument::new(path.display().to_string(), content, language);
        self.validate(&document)
    }
}

impl Default for SyntacticLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SyntacticLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntacticLock")
            .field("languages", &SupportedLanguage::all())
            .finish_non_exhaustive()
    }
}

/// A syntax error found in a validated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// URI or path of the affected document.
    pub uri: String,
    /// Line number (one-based).
    pub line: u32,
    /// Column number (one-based).
    pub column: u32,
    /// Human-readable description of the problem.
    pub message: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.uri, self.line, self.column, self.message
        )
    }
}
