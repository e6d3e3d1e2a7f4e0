//! Unit and behaviour tests for `unawaited-syntax`.
