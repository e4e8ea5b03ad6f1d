//! Files command handler.

use clap::Args;
use paleae_core::{config::AppConfig, AppError, AppResult};
use paleae_snapshot::SnapshotOptions;

use super::ScanArgs;

/// List accepted files
#[derive(Args, Debug)]
pub struct FilesCommand {
    #[command(flatten)]
    pub scan: ScanArgs,
}

impl FilesCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing files command");

        let options = SnapshotOptions::from_config(config)?;
        let filters = paleae_snapshot::filters_for(&options)?;
        let files = paleae_snapshot::collect(&options, &filters, &self.scan.reporter())?;

        if files.is_empty() {
            return Err(AppError::Other(
                "No text files found matching criteria".to_string(),
            ));
        }

        for relpath in &files {
            println!("{}", relpath);
        }

        Ok(())
    }
}
