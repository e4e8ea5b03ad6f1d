//! paleae CLI
//!
//! Main entry point for the paleae command-line tool.
//! Turns a repository into a filtered, chunked snapshot for language models.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AboutCommand, CheckCommand, FeedCommand, FilesCommand, SnapshotCommand};
use paleae_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// paleae - repository snapshots for language-model context
#[derive(Parser, Debug)]
#[command(name = "paleae")]
#[command(about = "Snapshot a codebase into JSON, JSONL, Markdown, CSV or XLSX for LLM context", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: <root>/.paleae.yaml when present)
    #[arg(short, long, global = true, env = "PALEAE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a full snapshot (json, markdown, jsonl, csv, xlsx or zip)
    Snapshot(SnapshotCommand),

    /// Write a row feed (jsonl, csv or xlsx)
    Feed(FeedCommand),

    /// Re-read every accepted file and report failures
    Check(CheckCommand),

    /// List accepted files, one per line
    Files(FilesCommand),

    /// Show project information
    About(AboutCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Snapshot(_) => "snapshot",
            Commands::Feed(_) => "feed",
            Commands::Check(_) => "check",
            Commands::Files(_) => "files",
            Commands::About(_) => "about",
        }
    }

    /// Filter flags of commands that scan a tree.
    fn scan(&self) -> Option<&commands::ScanArgs> {
        match self {
            Commands::Snapshot(cmd) => Some(&cmd.scan),
            Commands::Feed(cmd) => Some(&cmd.scan),
            Commands::Check(cmd) => Some(&cmd.scan),
            Commands::Files(cmd) => Some(&cmd.scan),
            Commands::About(_) => None,
        }
    }

    /// Chunk flags of commands that build rows.
    fn chunking(&self) -> Option<&commands::ChunkArgs> {
        match self {
            Commands::Snapshot(cmd) => Some(&cmd.output.chunk),
            Commands::Feed(cmd) => Some(&cmd.output.chunk),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let scan = cli.command.scan();
    let chunking = cli.command.chunking();
    let root = scan.map_or_else(|| PathBuf::from("."), |s| s.root.clone());

    // Defaults, then config file, then environment
    let config = AppConfig::load(&root, cli.config.as_deref())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        scan.and_then(|s| s.profile.clone()),
        scan.map(|s| s.include.clone()).unwrap_or_default(),
        scan.map(|s| s.exclude.clone()).unwrap_or_default(),
        chunking.and_then(|c| c.chunk_by.clone()),
        chunking.and_then(|c| c.max_chars),
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("paleae starting");
    tracing::debug!("Root: {:?}", config.root);
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Profile: {}", config.profile);

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    // Route to command handlers
    let result = match &cli.command {
        Commands::Snapshot(cmd) => cmd.execute(&config),
        Commands::Feed(cmd) => cmd.execute(&config),
        Commands::Check(cmd) => cmd.execute(&config),
        Commands::Files(cmd) => cmd.execute(&config),
        Commands::About(cmd) => cmd.execute(),
    };

    // The error itself is printed once, by `main`
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::debug!("Command failed: {:?}", e),
    }

    result
}
