//! Unit and behaviour tests for the `unawaited` facade.
