//! Unit and behaviour tests for the CLI runtime.

mod behaviour;
mod runner_tests;
mod support;
