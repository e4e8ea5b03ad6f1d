//! Snapshot type definitions.

use chrono::{DateTime, Utc};
use paleae_core::{AppConfig, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chunk::ChunkStrategy;
use crate::filter::{Filters, Profile, IGNORE_FILE_NAME};
use crate::row::Row;

/// Tool name recorded in every report.
pub const TOOL_NAME: &str = "paleae";

/// Tool version recorded in every report.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of error entries kept in a check report.
pub const MAX_REPORTED_ERRORS: usize = 20;

/// Resolved options for one snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// Directory to snapshot
    pub root: PathBuf,

    /// Inclusion profile
    pub profile: Profile,

    /// Extra include regexes
    pub include: Vec<String>,

    /// Extra exclude regexes
    pub exclude: Vec<String>,

    /// Chunking strategy
    pub strategy: ChunkStrategy,

    /// Maximum characters per chunk
    pub max_chars: usize,

    /// Files larger than this are never treated as text
    pub max_file_size: u64,
}

impl SnapshotOptions {
    /// Resolve names and validate limits from the layered configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;

        Ok(Self {
            root: config.root.clone(),
            profile: Profile::from_name(&config.profile)?,
            include: config.include.clone(),
            exclude: config.exclude.clone(),
            strategy: ChunkStrategy::from_name(&config.chunk_by)?,
            max_chars: config.max_chars,
            max_file_size: config.max_file_size,
        })
    }
}

/// What was found in `.paleaeignore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreSummary {
    pub file: String,
    pub present: bool,
    pub patterns: usize,
    pub negations: usize,
}

impl IgnoreSummary {
    pub fn from_filters(filters: &Filters) -> Self {
        Self {
            file: IGNORE_FILE_NAME.to_string(),
            present: filters.ignore.present,
            patterns: filters.ignore.positive.len(),
            negations: filters.ignore.negative.len(),
        }
    }
}

/// Totals over one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCounts {
    pub files: usize,
    pub rows: usize,
    pub total_chars: usize,
    pub estimated_tokens: usize,
}

/// Run metadata written ahead of the rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub tool: String,
    pub version: String,
    pub root: String,
    pub profile: String,
    pub chunk_by: String,
    pub max_chars: usize,
    pub ts: DateTime<Utc>,
    pub ignore_file: IgnoreSummary,
    pub counts: SnapshotCounts,
}

impl SnapshotMeta {
    pub fn new(options: &SnapshotOptions, filters: &Filters, files: usize, rows: &[Row]) -> Self {
        let root = options
            .root
            .canonicalize()
            .unwrap_or_else(|_| options.root.clone());

        Self {
            tool: TOOL_NAME.to_string(),
            version: TOOL_VERSION.to_string(),
            root: root.display().to_string(),
            profile: options.profile.name().to_string(),
            chunk_by: options.strategy.name().to_string(),
            max_chars: options.max_chars,
            ts: Utc::now(),
            ignore_file: IgnoreSummary::from_filters(filters),
            counts: SnapshotCounts {
                files,
                rows: rows.len(),
                total_chars: rows.iter().map(|r| r.text.chars().count()).sum(),
                estimated_tokens: rows.iter().map(|r| r.est_tokens).sum(),
            },
        }
    }
}

/// A complete snapshot: accepted files, their rows and run metadata.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub files: Vec<String>,
    pub rows: Vec<Row>,
}

/// One file that could not be read during a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckError {
    pub relpath: String,
    pub error: String,
}

/// Totals of a readability check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCounts {
    pub scanned: usize,
    pub readable: usize,
    pub errors: usize,
}

/// Result of re-reading every accepted file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub tool: String,
    pub version: String,
    pub ts: DateTime<Utc>,
    pub profile: String,
    pub counts: CheckCounts,
    /// First errors only, see [`MAX_REPORTED_ERRORS`]
    pub errors: Vec<CheckError>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.counts.errors == 0
    }
}

/// Content hash of one accepted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub relpath: String,
    pub sha256: String,
}

/// Sidecar listing a hash per accepted file, for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffSummary {
    pub ts: DateTime<Utc>,
    pub count: usize,
    pub entries: Vec<DiffEntry>,
}
