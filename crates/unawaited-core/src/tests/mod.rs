//! Unit tests for `unawaited_core` types.

mod config_tests;
mod finding_tests;
