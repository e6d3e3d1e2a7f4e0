//! Tree-sitter host for the `unawaited` analysis pipeline.
//!
//! This crate supplies everything the rule engine needs from a host
//! language:
//!
//! - **Parsing** via [`Parser`] and [`ParseResult`]
//! - **Documents** via [`SourceDocument`], which renders spans and applies
//!   [`unawaited_core::Patch`]es with re-parse verification
//! - **Type queries** via the [`TypeOracle`] trait and its Python
//!   implementation, [`PythonTypeOracle`]
//! - **Validation** via [`SyntacticLock`] before rewritten files are saved
//!
//! # Example
//!
//! ```
//! use unawaited_core::{NodeRef, Patch};
//! use unawaited_syntax::{SourceDocument, span_of};
//!
//! let document = SourceDocument::python("file:///app.py", "x = compute()\n");
//! let parsed = document.parse()?;
//! let call = parsed
//!     .root_node()
//!     .descendant_for_byte_range(4, 13)
//!     .expect("call node");
//! let patch = Patch::new(NodeRef::new(call.kind(), span_of(call)), "compute(1)");
//! let patched = document.apply(&patch)?;
//! assert_eq!(patched.source(), "x = compute(1)\n");
//! # Ok::<(), unawaited_syntax::SyntaxError>(())
//! ```

mod document;
mod error;
mod language;
mod parser;
mod position;
mod python;
mod syntactic_lock;
mod traverse;
mod types;

pub use document::{BatchOutcome, SourceDocument};
pub use error::SyntaxError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::{line_col, span_between, span_of};
pub use python::{DEFAULT_MODULE_NAME, PythonTypeOracle};
pub use syntactic_lock::{SyntacticLock, ValidationFailure};
pub use traverse::{Descendants, ancestors_and_self, nodes_of_kind, starts_with_async};
pub use types::{QualifiedName, TypeOracle, TypeRef};

#[cfg(test)]
mod tests;
