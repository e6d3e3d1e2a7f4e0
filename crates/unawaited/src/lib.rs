//! Unawaited: flags `with` statements that acquire a pending computation
//! instead of its result, and rewrites them to `await` it first.
//!
//! This facade crate re-exports the stable types from [`unawaited_core`] and
//! [`unawaited_syntax`] and provides the [`Engine`] entrypoint, which runs
//! every registered [`Rule`] over a document and routes fixes back to the
//! rule that reported them.
//!
//! # Core types
//!
//! - [`Finding`], [`Span`] and [`LineCol`] for reported defects
//! - [`Patch`] for structural edits
//! - [`Rule`], [`RuleContext`] and [`RuleRegistry`] for rule plumbing
//! - [`Engine`], [`FixOutcome`] and [`BatchOutcome`] for the pipeline
//!
//! # Example
//!
//! ```
//! use unawaited::{AnalysisConfig, Engine, SourceDocument};
//!
//! let source = "\
//! import io
//!
//! async def open_buffer() -> io.BytesIO: ...
//!
//! async def main():
//!     with open_buffer() as buffer:
//!         pass
//! ";
//! let engine = Engine::new(AnalysisConfig::default());
//! let document = SourceDocument::python("file:///main.py", source);
//! let findings = engine.analyze(&document)?;
//! assert_eq!(findings.len(), 1);
//!
//! let fixed = engine.fix_all(&document)?;
//! assert!(fixed.document().source().contains("with await open_buffer() as buffer:"));
//! # Ok::<(), unawaited::EngineError>(())
//! ```

mod engine;
mod error;
mod rule;
pub mod rules;

pub use unawaited_core::{
    AnalysisConfig, Finding, FindingKey, LineCol, NodeRef, Patch, RuleCategory, RuleMetadata,
    Severity, Span,
};
pub use unawaited_syntax::{BatchOutcome, SourceDocument, SupportedLanguage};

pub use engine::{Engine, FixOutcome};
pub use error::EngineError;
pub use rule::{Rule, RuleContext, RuleRegistry};
pub use rules::with_missing_await::{WITH_MISSING_AWAIT, WithMissingAwait};

#[cfg(test)]
mod tests;
