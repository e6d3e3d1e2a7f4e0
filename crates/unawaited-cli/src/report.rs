//! Per-file results collected by the commands and consumed by the renderers.

use camino::Utf8PathBuf;
use serde::Serialize;
use unawaited::{Finding, RuleMetadata, SourceDocument};

/// Findings for one analysed file, with the document they point into.
#[derive(Debug, Clone)]
pub(crate) struct CheckedFile {
    pub(crate) path: Utf8PathBuf,
    pub(crate) document: SourceDocument,
    pub(crate) findings: Vec<Finding>,
}

/// Outcome of batch-fixing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FixedFile {
    pub(crate) path: Utf8PathBuf,
    pub(crate) applied: usize,
    pub(crate) skipped: usize,
    pub(crate) written: bool,
}

impl FixedFile {
    pub(crate) const fn has_changes(&self) -> bool {
        self.applied > 0 || self.skipped > 0
    }
}

/// A registered rule and whether configuration leaves it enabled.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RuleEntry<'a> {
    #[serde(flatten)]
    pub(crate) metadata: &'a RuleMetadata,
    pub(crate) enabled: bool,
}
