//! Metadata types for snapshot rows

use serde::{Deserialize, Serialize};

/// Coarse role of a file within a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Test,
    Code,
    Doc,
    Config,
    Data,
}

impl FileKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Test => "test",
            FileKind::Code => "code",
            FileKind::Doc => "doc",
            FileKind::Config => "config",
            FileKind::Data => "data",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path-derived classification shared by every row of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Language label ("python", "rust", ..., "text")
    pub language: String,

    /// File role
    pub kind: FileKind,

    /// Tags derived from the path
    pub tags: Vec<String>,
}
