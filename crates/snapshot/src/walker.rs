//! Directory traversal producing the accepted file list.

use crate::filter::Filters;
use crate::progress::ProgressReporter;
use crate::text::TextClassifier;
use paleae_core::{AppError, AppResult};
use std::collections::BTreeSet;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Forward-slash relative path of `path` under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Walk `root` and return every accepted relative path, sorted and unique.
///
/// Excluded directories are pruned before their contents are listed, so no
/// ignore-file negation can re-include anything beneath them. Any error
/// while iterating aborts the walk; a partial list is never returned.
pub fn collect_files(
    root: &Path,
    filters: &Filters,
    classifier: &TextClassifier,
    progress: &ProgressReporter,
) -> AppResult<Vec<String>> {
    if !root.is_dir() {
        return Err(AppError::DirectoryNotFound(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            match relative_path(root, entry.path()) {
                Some(rel) if filters.prunes_dir(&rel) => {
                    tracing::trace!("Pruned directory {}", rel);
                    false
                }
                _ => true,
            }
        });

    let mut accepted = BTreeSet::new();
    let mut seen = 0u64;

    for entry in walker {
        let entry = entry.map_err(|e| AppError::Traversal {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }
        let Some(rel) = relative_path(root, entry.path()) else {
            continue;
        };

        seen += 1;
        progress.discover(seen, None, &rel);

        if filters.is_excluded(&rel) {
            tracing::trace!("Excluded {}", rel);
            continue;
        }
        if !filters.is_included(&rel) {
            tracing::trace!("Not included {}", rel);
            continue;
        }
        if !classifier.is_text(entry.path()) {
            tracing::debug!("Not text {}", rel);
            continue;
        }

        accepted.insert(rel);
    }

    tracing::info!(
        "Collected {} of {} files under {:?}",
        accepted.len(),
        seen,
        root
    );

    Ok(accepted.into_iter().collect())
}
