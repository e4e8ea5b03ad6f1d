//! About command handler.

use clap::Args;
use paleae_core::AppResult;

/// Show project information
#[derive(Args, Debug)]
pub struct AboutCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AboutCommand {
    pub fn execute(&self) -> AppResult<()> {
        let name = env!("CARGO_PKG_NAME");
        let version = env!("CARGO_PKG_VERSION");
        let license = env!("CARGO_PKG_LICENSE");
        let website = env!("CARGO_PKG_HOMEPAGE");
        let source = env!("CARGO_PKG_REPOSITORY");

        if self.json {
            let output = serde_json::json!({
                "name": name,
                "version": version,
                "license": license,
                "website": website,
                "source": source,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{} {} ({})", name, version, license);
            println!("Website: {}", website);
            println!("Source:  {}", source);
        }

        Ok(())
    }
}
