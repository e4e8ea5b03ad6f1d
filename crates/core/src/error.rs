//! Error types for paleae.
//!
//! This module defines a unified error enum that covers every fatal error
//! category in the application: configuration, pattern compilation,
//! traversal, I/O, export, and serialization errors.
//!
//! Per-file problems (unreadable, binary, oversized) are never represented
//! here. They only drop the file from the snapshot.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for paleae.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// Fatal errors carry enough context (path, pattern, underlying error) to
/// produce a precise diagnostic.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A user-supplied or profile regular expression failed to compile
    #[error("Invalid regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The scan root does not exist or is not a directory
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Directory iteration failed mid-walk
    #[error("Error traversing {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output writing errors
    #[error("Error writing {}: {message}", path.display())]
    Export { path: PathBuf, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message_names_pattern() {
        let source = regex::Regex::new("[").unwrap_err();
        let err = AppError::InvalidPattern {
            pattern: "[".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid regex '['"));
    }

    #[test]
    fn test_directory_not_found_message() {
        let err = AppError::DirectoryNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "Directory not found: /no/such/dir");
    }

    #[test]
    fn test_from_serde_json() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
