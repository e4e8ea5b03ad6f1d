//! Output writers.
//!
//! Every writer renders into a temporary file next to the destination and
//! renames it into place once complete, so an interrupted run leaves either
//! the previous file or nothing.

mod bundle;
mod csv;
mod json;
mod markdown;
mod xlsx;

pub use self::bundle::{write_zip, BUNDLE_JSON, BUNDLE_MARKDOWN};
pub use self::csv::{write_csv, CSV_COLUMNS};
pub use self::json::{write_json, write_jsonl};
pub use self::markdown::write_markdown;
pub use self::xlsx::{write_xlsx, META_SHEET, ROWS_SHEET};

use paleae_core::{AppError, AppResult};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::progress::ProgressReporter;
use crate::types::{DiffSummary, Snapshot};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Jsonl,
    Markdown,
    Csv,
    Xlsx,
    Zip,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> AppResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "jsonl" => Ok(ExportFormat::Jsonl),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            "zip" => Ok(ExportFormat::Zip),
            other => Err(AppError::Config(format!("Unsupported format: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Jsonl => "jsonl",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Zip => "zip",
        }
    }

    /// File extension used for default output names.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            other => other.name(),
        }
    }
}

/// Write `snapshot` to `path` in `format`.
pub fn export(
    snapshot: &Snapshot,
    format: ExportFormat,
    path: &Path,
    progress: &ProgressReporter,
) -> AppResult<()> {
    write_atomic(path, |w| match format {
        ExportFormat::Json => write_json(w, &snapshot.meta, &snapshot.rows),
        ExportFormat::Jsonl => write_jsonl(w, &snapshot.meta, &snapshot.rows),
        ExportFormat::Markdown => write_markdown(w, &snapshot.meta, &snapshot.rows),
        ExportFormat::Csv => write_csv(w, &snapshot.rows),
        ExportFormat::Xlsx => write_xlsx(w, &snapshot.meta, &snapshot.rows),
        ExportFormat::Zip => write_zip(w, &snapshot.meta, &snapshot.rows),
    })?;

    progress.export(
        snapshot.rows.len() as u64,
        format.name(),
        &path.display().to_string(),
    );
    tracing::info!(
        "Wrote {} to {:?} ({} rows from {} files)",
        format.name(),
        path,
        snapshot.rows.len(),
        snapshot.files.len()
    );

    Ok(())
}

/// Pretty-printed JSON of any serializable value, written atomically.
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> AppResult<()> {
    write_atomic(path, |w| {
        serde_json::to_writer_pretty(&mut *w, value)?;
        writeln!(w)?;
        Ok(())
    })
}

/// `out/snapshot.json` -> `out/snapshot.diff.json`
pub fn diff_summary_path(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    out.with_file_name(format!("{}.diff.json", stem))
}

/// Write the diff-summary sidecar for `out` and return its path.
pub fn write_diff_summary(summary: &DiffSummary, out: &Path) -> AppResult<PathBuf> {
    let sidecar = diff_summary_path(out);
    write_json_file(summary, &sidecar)?;
    tracing::info!(
        "Wrote diff summary to {:?} ({} entries)",
        sidecar,
        summary.count
    );
    Ok(sidecar)
}

/// Render through `write` into a temporary file, then move it onto `path`.
pub fn write_atomic<F>(path: &Path, write: F) -> AppResult<()>
where
    F: FnOnce(&mut dyn Write) -> AppResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| export_error(path, e))?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| export_error(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| export_error(path, e))?;
    }

    tmp.persist(path).map_err(|e| export_error(path, e.error))?;
    tracing::debug!("Persisted {:?}", path);
    Ok(())
}

fn export_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::Export {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("JSON").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_name("md").unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::Jsonl.extension(), "jsonl");
        assert_eq!(ExportFormat::from_name("XLSX").unwrap(), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::Zip.extension(), "zip");
        assert!(matches!(ExportFormat::from_name("parquet"), Err(AppError::Config(_))));
    }

    #[test]
    fn test_diff_summary_path() {
        assert_eq!(
            diff_summary_path(Path::new("out/snapshot.json")),
            PathBuf::from("out/snapshot.diff.json")
        );
        assert_eq!(
            diff_summary_path(Path::new("feed")),
            PathBuf::from("feed.diff.json")
        );
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/out.txt");

        write_atomic(&path, |w| {
            w.write_all(b"hello")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_failed_write_leaves_previous_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");
        fs::write(&path, "previous").unwrap();

        let result = write_atomic(&path, |w| {
            w.write_all(b"partial")?;
            Err(AppError::Other("interrupted".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
        // Only the original file remains
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
