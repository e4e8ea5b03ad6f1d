//! Logging infrastructure for paleae.
//!
//! This module initializes the tracing subscriber for structured logging.
//! All logs are emitted to stderr to keep stdout clean for data output.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// This sets up structured logging with:
/// - Output to stderr (stdout is reserved for reports and path lists)
/// - Environment-based filtering (RUST_LOG or provided level)
/// - Optional ANSI color control
///
/// # Arguments
/// * `log_level` - Optional log level override (e.g., "debug", "info")
/// * `no_color` - Disable colored output
///
/// # Example
/// ```no_run
/// use paleae_core::logging::init_logging;
///
/// init_logging(None, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(use_ansi(
            no_color,
            std::env::var_os("NO_COLOR").is_some(),
            std::io::stderr().is_terminal(),
        ));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

/// Colors only on an interactive stderr, and never when disabled by flag or
/// by `NO_COLOR`.
fn use_ansi(no_color: bool, no_color_env: bool, stderr_is_terminal: bool) -> bool {
    !no_color && !no_color_env && stderr_is_terminal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_rejected() {
        let result = init_logging(Some("paleae=notalevel"), true);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_ansi_requires_terminal() {
        assert!(use_ansi(false, false, true));
        // Redirected stderr
        assert!(!use_ansi(false, false, false));
        assert!(!use_ansi(true, false, true));
        assert!(!use_ansi(false, true, true));
    }

    #[test]
    fn test_init_logging() {
        // Only the first initialization in a process succeeds
        let result = init_logging(None, true);
        assert!(result.is_ok() || result.is_err());
    }
}
