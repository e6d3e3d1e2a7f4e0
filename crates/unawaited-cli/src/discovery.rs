//! Source file discovery.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use unawaited_syntax::SupportedLanguage;
use walkdir::{DirEntry, WalkDir};

use crate::AppError;

/// Expands `roots` into the sorted, de-duplicated list of supported source
/// files beneath them.
///
/// A root naming a file is kept only when its extension is supported. Hidden
/// directories below a root (`.git`, `.venv`, ...) are not entered.
pub(crate) fn discover(roots: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>, AppError> {
    let mut files = BTreeSet::new();
    for root in roots {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
        for entry in walker {
            let entry = entry.map_err(|source| AppError::Discovery {
                path: root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = Utf8PathBuf::from_path_buf(entry.into_path())
                .map_err(|path| AppError::NonUtf8Path(path.display().to_string()))?;
            if is_supported(&path) {
                files.insert(path);
            }
        }
    }
    Ok(files.into_iter().collect())
}

fn is_supported(path: &Utf8Path) -> bool {
    SupportedLanguage::from_path(path.as_std_path()).is_some()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
