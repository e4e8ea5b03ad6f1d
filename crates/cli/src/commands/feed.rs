//! Feed command handler.
//!
//! A feed is the row stream alone, in a format that tools can ingest line by
//! line or as a table.

use clap::Args;
use paleae_core::{config::AppConfig, AppResult};
use paleae_snapshot::export::ExportFormat;

use super::{parse_format, run_export, OutputArgs, ScanArgs};

pub(crate) const FORMATS: [ExportFormat; 3] =
    [ExportFormat::Jsonl, ExportFormat::Csv, ExportFormat::Xlsx];

/// Write a row feed
#[derive(Args, Debug)]
pub struct FeedCommand {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output format (jsonl, csv, xlsx)
    #[arg(short, long, default_value = "jsonl")]
    pub format: String,
}

impl FeedCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing feed command");
        tracing::debug!("Feed options: {:?}", self);

        let format = parse_format(&self.format, &FORMATS)?;
        run_export(config, &self.scan, &self.output, format, "feed")
    }
}
