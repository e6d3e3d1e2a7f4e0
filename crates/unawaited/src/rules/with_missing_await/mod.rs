//! `UAW0001`: a `with` statement acquires a pending computation instead of
//! its result.
//!
//! ```python
//! async def open_conn() -> Connection: ...
//!
//! async def main():
//!     with open_conn() as conn:   # the context manager is the coroutine
//!         ...
//! ```
//!
//! The statement enters and exits the awaitable handle, so the connection it
//! eventually produces is never released. The fix wraps each offending
//! initializer in `await`, leaving the rest of the statement untouched.

mod matcher;
mod predicate;
mod rewriter;

use unawaited_core::{Finding, Patch, RuleCategory, RuleMetadata, Severity, Span};

use crate::rule::{Rule, RuleContext};

pub use self::predicate::{is_deferred_disposable, is_disposable_capability};

/// Rule code of the missing-`await` rule.
pub const WITH_MISSING_AWAIT: &str = "UAW0001";

static METADATA: RuleMetadata = RuleMetadata {
    code: WITH_MISSING_AWAIT,
    name: "with-missing-await",
    title: "Await is missing in with statement",
    description: "A with statement whose initializer is a pending computation of a \
        context manager enters and exits the computation handle instead of the \
        resource it produces, so the resource is never released.",
    category: RuleCategory::Usage,
    default_severity: Severity::Warning,
    enabled_by_default: true,
    fix_title: Some("Add missing await"),
};

/// Flags `with` bindings whose initializer is a pending computation of a
/// context manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithMissingAwait;

impl Rule for WithMissingAwait {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn analyze(&self, context: &RuleContext<'_>) -> Vec<Finding> {
        matcher::analyze(context)
    }

    fn fix(&self, context: &RuleContext<'_>, span: &Span) -> Option<Patch> {
        rewriter::fix(context, span)
    }
}
