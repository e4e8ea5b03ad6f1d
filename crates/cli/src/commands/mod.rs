//! Command handlers for the paleae CLI.
//!
//! Flag groups shared between subcommands live here; each subcommand has its
//! own submodule.

pub mod about;
pub mod check;
pub mod feed;
pub mod files;
pub mod snapshot;

// Re-export command types for convenience
pub use about::AboutCommand;
pub use check::CheckCommand;
pub use feed::FeedCommand;
pub use files::FilesCommand;
pub use snapshot::SnapshotCommand;

use clap::Args;
use paleae_core::{config::AppConfig, AppError, AppResult};
use paleae_snapshot::export::{self, ExportFormat};
use paleae_snapshot::{ProgressReporter, SnapshotOptions};
use std::path::PathBuf;
use std::sync::Arc;

/// Which files to scan
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Inclusion profile (minimal, ai_optimized)
    #[arg(long)]
    pub profile: Option<String>,

    /// Extra include regex (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Extra exclude regex (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Print progress lines to stderr
    #[arg(long)]
    pub progress: bool,
}

impl ScanArgs {
    pub fn reporter(&self) -> ProgressReporter {
        if self.progress {
            ProgressReporter::new(Arc::new(|event| eprintln!("{}", event.format_simple())))
        } else {
            ProgressReporter::noop()
        }
    }
}

/// How files are split into rows
#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// Chunking strategy (file, lines, functions, classes)
    #[arg(long)]
    pub chunk_by: Option<String>,

    /// Maximum characters per chunk
    #[arg(long)]
    pub max_chars: Option<usize>,
}

/// Where rows are written
#[derive(Args, Debug)]
pub struct OutputArgs {
    #[command(flatten)]
    pub chunk: ChunkArgs,

    /// Output file (default: <command>.<ext> in the current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Also write a `<out-stem>.diff.json` sidecar with per-file hashes
    #[arg(long)]
    pub diff_summary: bool,
}

/// Parse `name` and reject formats the command does not offer.
pub(crate) fn parse_format(name: &str, allowed: &[ExportFormat]) -> AppResult<ExportFormat> {
    let format = ExportFormat::from_name(name)?;
    if !allowed.contains(&format) {
        let names: Vec<&str> = allowed.iter().map(ExportFormat::name).collect();
        return Err(AppError::Config(format!(
            "Unsupported format '{}' (expected one of: {})",
            name,
            names.join(", ")
        )));
    }
    Ok(format)
}

/// Snapshot `config.root` and write it to the resolved output path.
///
/// Shared by `snapshot` and `feed`, which differ only in accepted formats and
/// default output name.
pub(crate) fn run_export(
    config: &AppConfig,
    scan: &ScanArgs,
    output: &OutputArgs,
    format: ExportFormat,
    default_stem: &str,
) -> AppResult<()> {
    let options = SnapshotOptions::from_config(config)?;
    let progress = scan.reporter();

    let snapshot = paleae_snapshot::take_snapshot(&options, &progress)?;

    let out = output
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_stem, format.extension())));
    export::export(&snapshot, format, &out, &progress)?;

    println!(
        "Wrote {} rows from {} files to {}",
        snapshot.meta.counts.rows,
        snapshot.meta.counts.files,
        out.display()
    );

    if output.diff_summary {
        let summary = paleae_snapshot::diff_summary(&options.root, &snapshot.files);
        let sidecar = export::write_diff_summary(&summary, &out)?;
        println!("Wrote diff summary to {}", sidecar.display());
    }

    Ok(())
}
