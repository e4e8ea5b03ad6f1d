//! Snapshot command handler.

use clap::Args;
use paleae_core::{config::AppConfig, AppResult};
use paleae_snapshot::export::ExportFormat;

use super::{parse_format, run_export, OutputArgs, ScanArgs};

pub(crate) const FORMATS: [ExportFormat; 6] = [
    ExportFormat::Json,
    ExportFormat::Markdown,
    ExportFormat::Jsonl,
    ExportFormat::Csv,
    ExportFormat::Xlsx,
    ExportFormat::Zip,
];

/// Write a full snapshot
#[derive(Args, Debug)]
pub struct SnapshotCommand {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output format (json, markdown, jsonl, csv, xlsx, zip)
    #[arg(short, long, default_value = "json")]
    pub format: String,
}

impl SnapshotCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing snapshot command");
        tracing::debug!("Snapshot options: {:?}", self);

        let format = parse_format(&self.format, &FORMATS)?;
        run_export(config, &self.scan, &self.output, format, "snapshot")
    }
}
