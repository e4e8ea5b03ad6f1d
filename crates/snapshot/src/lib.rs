//! Repository snapshots for language-model context.
//!
//! Walks a directory tree through a layered inclusion engine, splits the
//! accepted text files into line-range chunks and turns every chunk into a
//! flat row that the exporters serialize.

pub mod chunk;
pub mod deps;
pub mod export;
pub mod filter;
pub mod metadata;
pub mod progress;
pub mod row;
pub mod text;
pub mod types;
pub mod walker;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use chunk::{Chunk, ChunkStrategy};
pub use filter::{Filters, PatternSet, Profile};
pub use progress::{ProgressEvent, ProgressReporter};
pub use row::Row;
pub use types::{CheckReport, DiffSummary, Snapshot, SnapshotMeta, SnapshotOptions};

use chrono::Utc;
use paleae_core::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::time::Instant;

use filter::IgnoreRules;
use text::TextClassifier;
use types::{CheckCounts, CheckError, DiffEntry, MAX_REPORTED_ERRORS, TOOL_NAME, TOOL_VERSION};

/// Compile every filter for `options`, reading the ignore file at the root.
pub fn filters_for(options: &SnapshotOptions) -> AppResult<Filters> {
    let ignore = IgnoreRules::load(&options.root)?;
    Filters::new(options.profile, &options.include, &options.exclude, ignore)
}

/// Accepted relative paths under the configured root.
pub fn collect(
    options: &SnapshotOptions,
    filters: &Filters,
    progress: &ProgressReporter,
) -> AppResult<Vec<String>> {
    let classifier = TextClassifier::new(options.max_file_size);
    walker::collect_files(&options.root, filters, &classifier, progress)
}

/// Read `<root>/<relpath>` as UTF-8, replacing invalid sequences.
pub fn read_text(root: &Path, relpath: &str) -> std::io::Result<String> {
    let bytes = fs::read(root.join(relpath))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Chunk every file and build its rows, sorted by path and line range.
///
/// Files that cannot be read or are blank are skipped.
pub fn build_rows(
    root: &Path,
    files: &[String],
    options: &SnapshotOptions,
    progress: &ProgressReporter,
) -> Vec<Row> {
    let total = files.len() as u64;
    let mut rows = Vec::new();

    for (i, relpath) in files.iter().enumerate() {
        let current = i as u64 + 1;
        progress.read(current, Some(total), relpath);

        let text = match read_text(root, relpath) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Skipping unreadable {}: {}", relpath, e);
                continue;
            }
        };
        if text.trim().is_empty() {
            tracing::debug!("Skipping blank {}", relpath);
            continue;
        }

        let file = metadata::classify(relpath);
        let language = chunk::Language::from_path(relpath);
        let file_deps = deps::extract_dependencies(language, &text);

        let before = rows.len();
        for piece in chunk::split(&text, options.strategy, language, options.max_chars) {
            rows.push(row::build_row(
                relpath,
                &piece,
                &file,
                &file_deps,
                options.profile.name(),
            ));
        }
        progress.chunk(current, Some(total), rows.len() - before);
    }

    rows.sort_by(|a, b| {
        (a.relpath.as_str(), a.start, a.end).cmp(&(b.relpath.as_str(), b.start, b.end))
    });
    rows
}

/// Collect, chunk and describe a whole tree.
///
/// A tree with no accepted files is an error rather than an empty snapshot.
pub fn take_snapshot(options: &SnapshotOptions, progress: &ProgressReporter) -> AppResult<Snapshot> {
    let start = Instant::now();
    tracing::info!("Starting snapshot of {:?}", options.root);

    let filters = filters_for(options)?;
    let files = collect(options, &filters, progress)?;
    if files.is_empty() {
        return Err(AppError::Other(
            "No text files found matching criteria".to_string(),
        ));
    }

    let rows = build_rows(&options.root, &files, options, progress);
    let meta = SnapshotMeta::new(options, &filters, files.len(), &rows);

    tracing::info!(
        "Snapshot complete: {} files, {} rows in {:.2}s",
        files.len(),
        rows.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(Snapshot { meta, files, rows })
}

/// Re-read every accepted file and report the ones that fail.
pub fn check(options: &SnapshotOptions, progress: &ProgressReporter) -> AppResult<CheckReport> {
    let filters = filters_for(options)?;
    let files = collect(options, &filters, progress)?;

    let mut counts = CheckCounts {
        scanned: files.len(),
        ..CheckCounts::default()
    };
    let mut errors = Vec::new();

    for (i, relpath) in files.iter().enumerate() {
        progress.read(i as u64 + 1, Some(files.len() as u64), relpath);
        match read_text(&options.root, relpath) {
            Ok(_) => counts.readable += 1,
            Err(e) => {
                tracing::warn!("Unreadable {}: {}", relpath, e);
                counts.errors += 1;
                if errors.len() < MAX_REPORTED_ERRORS {
                    errors.push(CheckError {
                        relpath: relpath.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    tracing::info!(
        "Checked {} files: {} readable, {} errors",
        counts.scanned,
        counts.readable,
        counts.errors
    );

    Ok(CheckReport {
        tool: TOOL_NAME.to_string(),
        version: TOOL_VERSION.to_string(),
        ts: Utc::now(),
        profile: options.profile.name().to_string(),
        counts,
        errors,
    })
}

/// Hash every readable file in `files`.
pub fn diff_summary(root: &Path, files: &[String]) -> DiffSummary {
    let entries: Vec<DiffEntry> = files
        .iter()
        .filter_map(|relpath| {
            let text = read_text(root, relpath).ok()?;
            Some(DiffEntry {
                relpath: relpath.clone(),
                sha256: metadata::content_hash(&text),
            })
        })
        .collect();

    DiffSummary {
        ts: Utc::now(),
        count: entries.len(),
        entries,
    }
}
