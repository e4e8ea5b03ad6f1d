//! Configuration management for paleae.
//!
//! This module handles loading and merging configuration from multiple sources,
//! lowest precedence first:
//! - Built-in defaults
//! - Config file (`PALEAE_CONFIG`, or `.paleae.yaml` at the scan root)
//! - Environment variables
//! - Command-line flags
//!
//! Profile and chunk strategy names are kept as strings here; the snapshot
//! crate resolves them and rejects unknown names.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Name of the per-repository config file looked up at the scan root.
pub const CONFIG_FILE_NAME: &str = ".paleae.yaml";

/// Default upper bound for a single chunk, in characters.
pub const DEFAULT_MAX_CHARS: usize = 16_000;

/// Default size above which files are never treated as text.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory to snapshot
    pub root: PathBuf,

    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// Inclusion profile name ("minimal", "ai_optimized")
    pub profile: String,

    /// Extra include regexes, merged ahead of the profile includes
    pub include: Vec<String>,

    /// Extra exclude regexes, merged ahead of the profile excludes
    pub exclude: Vec<String>,

    /// Chunking strategy name ("file", "lines", "functions", "classes")
    pub chunk_by: String,

    /// Maximum characters per chunk
    pub max_chars: usize,

    /// Files larger than this are never snapshotted
    pub max_file_size: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    profile: Option<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
    chunk_by: Option<String>,
    max_chars: Option<usize>,
    max_file_size: Option<u64>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config_file: None,
            profile: "minimal".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
            chunk_by: "lines".to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration for a scan of `root`.
    ///
    /// The config file is `config_file` when given, else `PALEAE_CONFIG`, else
    /// `<root>/.paleae.yaml` when it exists. An explicitly named config file
    /// that does not exist is an error.
    ///
    /// Environment variables:
    /// - `PALEAE_CONFIG`: Path to config file
    /// - `PALEAE_PROFILE`: Inclusion profile
    /// - `PALEAE_CHUNK_BY`: Chunking strategy
    /// - `PALEAE_MAX_CHARS`: Maximum characters per chunk
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use paleae_core::config::AppConfig;
    /// use std::path::Path;
    ///
    /// let config = AppConfig::load(Path::new("."), None).expect("Failed to load config");
    /// println!("Profile: {}", config.profile);
    /// ```
    pub fn load(root: &Path, config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        let explicit = config_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("PALEAE_CONFIG").map(PathBuf::from));

        let config_path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                Some(path)
            }
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };

        if let Some(path) = config_path {
            config = config.merge_yaml(&path)?;
        }

        // Environment variables override YAML config
        if let Ok(profile) = std::env::var("PALEAE_PROFILE") {
            config.profile = profile;
        }

        if let Ok(chunk_by) = std::env::var("PALEAE_CHUNK_BY") {
            config.chunk_by = chunk_by;
        }

        if let Ok(max_chars) = std::env::var("PALEAE_MAX_CHARS") {
            config.max_chars = max_chars.trim().parse().map_err(|e| {
                AppError::Config(format!("Invalid PALEAE_MAX_CHARS '{}': {}", max_chars, e))
            })?;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var_os("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(profile) = config_file.profile {
            result.profile = profile;
        }
        result.include.extend(config_file.include);
        result.exclude.extend(config_file.exclude);
        if let Some(chunk_by) = config_file.chunk_by {
            result.chunk_by = chunk_by;
        }
        if let Some(max_chars) = config_file.max_chars {
            result.max_chars = max_chars;
        }
        if let Some(max_file_size) = config_file.max_file_size {
            result.max_file_size = max_file_size;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over the config file and environment. Include
    /// and exclude patterns from the command line are placed ahead of those
    /// from the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        profile: Option<String>,
        include: Vec<String>,
        exclude: Vec<String>,
        chunk_by: Option<String>,
        max_chars: Option<usize>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(profile) = profile {
            self.profile = profile;
        }

        if !include.is_empty() {
            let mut merged = include;
            merged.append(&mut self.include);
            self.include = merged;
        }

        if !exclude.is_empty() {
            let mut merged = exclude;
            merged.append(&mut self.exclude);
            self.exclude = merged;
        }

        if let Some(chunk_by) = chunk_by {
            self.chunk_by = chunk_by;
        }

        if let Some(max_chars) = max_chars {
            self.max_chars = max_chars;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate numeric limits.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_chars == 0 {
            return Err(AppError::Config(
                "max_chars must be greater than zero".to_string(),
            ));
        }

        if self.max_file_size == 0 {
            return Err(AppError::Config(
                "max_file_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.profile, "minimal");
        assert_eq!(config.chunk_by, "lines");
        assert_eq!(config.max_chars, 16_000);
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_merge_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "profile: ai_optimized\nexclude:\n  - '\\.lock$'\nmax_chars: 400\nlogging:\n  color: false\n",
        )
        .unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.profile, "ai_optimized");
        assert_eq!(config.exclude, vec!["\\.lock$".to_string()]);
        assert_eq!(config.max_chars, 400);
        assert!(config.no_color);
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_merge_empty_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "\n").unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.profile, "minimal");
    }

    #[test]
    fn test_merge_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "max_chars: [oops").unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        let result = AppConfig::load(temp.path(), Some(&missing));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_with_overrides() {
        let mut config = AppConfig::default();
        config.exclude = vec!["from_file".to_string()];

        let overridden = config.with_overrides(
            Some("ai_optimized".to_string()),
            vec!["^src/".to_string()],
            vec!["from_cli".to_string()],
            Some("functions".to_string()),
            Some(2000),
            None,
            true,
            false,
        );

        assert_eq!(overridden.profile, "ai_optimized");
        assert_eq!(overridden.include, vec!["^src/".to_string()]);
        assert_eq!(
            overridden.exclude,
            vec!["from_cli".to_string(), "from_file".to_string()]
        );
        assert_eq!(overridden.chunk_by, "functions");
        assert_eq!(overridden.max_chars, 2000);
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_zero_max_chars() {
        let mut config = AppConfig::default();
        config.max_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
