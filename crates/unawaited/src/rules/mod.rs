//! Built-in rules.

pub mod with_missing_await;

use crate::rule::Rule;

/// Returns a fresh instance of every built-in rule.
pub(crate) fn builtin() -> Vec<Box<dyn Rule>> {
    vec![Box::new(with_missing_await::WithMissingAwait)]
}
