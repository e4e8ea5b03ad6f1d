//! Check command handler.
//!
//! Re-reads every accepted file and reports the ones that fail, as JSON.

use clap::Args;
use paleae_core::{config::AppConfig, AppError, AppResult};
use paleae_snapshot::{export, SnapshotOptions};
use std::path::PathBuf;

use super::ScanArgs;

/// Re-read every accepted file
#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl CheckCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing check command");

        let options = SnapshotOptions::from_config(config)?;
        let report = paleae_snapshot::check(&options, &self.scan.reporter())?;

        match &self.out {
            Some(path) => {
                export::write_json_file(&report, path)?;
                println!("Wrote check report to {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        if report.is_clean() {
            Ok(())
        } else {
            Err(AppError::Other(format!(
                "{} of {} files could not be read",
                report.counts.errors, report.counts.scanned
            )))
        }
    }
}
