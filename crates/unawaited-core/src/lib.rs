//! Host-independent data model for the `unawaited` analysis pipeline.
//!
//! This crate holds the types that flow between the matcher, the rewriter,
//! and whatever host supplies syntax trees and type information: source
//! spans, findings, rule metadata, patches, and the analysis configuration.
//! It has no parser dependency, so a different host can reuse it unchanged.
//!
//! # Core types
//!
//! - [`Span`] and [`LineCol`]: byte and line/column source positions
//! - [`Finding`] and [`Severity`]: one reported defect instance
//! - [`RuleMetadata`] and [`RuleCategory`]: static description of a rule
//! - [`Patch`] and [`NodeRef`]: a structural edit produced by a fixer
//! - [`AnalysisConfig`]: pending templates, capabilities, and rule toggles
//!
//! # Example
//!
//! ```
//! use unawaited_core::{Finding, LineCol, Severity, Span};
//!
//! let span = Span::new(4, 30, LineCol::new(1, 4), LineCol::new(1, 30));
//! let finding = Finding::new(
//!     "UAW0001",
//!     "file:///app.py",
//!     span,
//!     String::from("await is missing"),
//!     Severity::Warning,
//! );
//! assert_eq!(finding.rule_code(), "UAW0001");
//! ```

mod config;
mod finding;
mod patch;
mod rule;
mod span;

pub use config::{
    AnalysisConfig, DEFAULT_DISPOSAL_CAPABILITIES, DEFAULT_PENDING_TEMPLATES,
};
pub use finding::{Finding, FindingKey, Severity, SeverityParseError};
pub use patch::{NodeRef, Patch};
pub use rule::{RuleCategory, RuleMetadata};
pub use span::{LineCol, Span};

#[cfg(test)]
mod tests;
