//! Host language detection and Tree-sitter grammar selection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Host languages the analysis pipeline can parse and annotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Python source and stub files (`.py`, `.pyi`).
    #[default]
    Python,
}

impl SupportedLanguage {
    /// Every language the pipeline can parse.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Python]
    }

    /// Returns the lower-case identifier, e.g. `python`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
        }
    }

    /// Returns the file extensions mapped to this language, without dots.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Python => &["py", "pyi"],
        }
    }

    /// Returns the Tree-sitter grammar.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Maps a file extension, compared case-insensitively, to its language.
    ///
    /// # Examples
    ///
    /// ```
    /// use unawaited_syntax::SupportedLanguage;
    ///
    /// assert_eq!(
    ///     SupportedLanguage::from_extension("pyi"),
    ///     Some(SupportedLanguage::Python)
    /// );
    /// assert_eq!(SupportedLanguage::from_extension("rs"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::all().iter().copied().find(|language| {
            language
                .extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    /// Maps a path to its language by extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let name = input.trim();
        Self::all()
            .iter()
            .copied()
            .find(|language| {
                language.as_str().eq_ignore_ascii_case(name)
                    || language
                        .extensions()
                        .first()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| LanguageParseError(name.to_ascii_lowercase()))
    }
}
