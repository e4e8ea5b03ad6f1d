//! Metadata module for snapshot rows
//!
//! Provides language and kind classification, tag derivation, size metrics,
//! and content hashing.

mod detect;
mod types;

pub use detect::{derive_tags, kind_from_path, language_from_path};
pub use types::{FileKind, FileMetadata};

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the UTF-8 text
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Rough token count at four characters per token.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    (text.chars().count() / 4).max(1)
}

/// Whitespace-separated word count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of lines in a chunk's text; an empty text has none.
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.matches('\n').count() + 1
    }
}

/// Classify a file from its relative path
pub fn classify(relpath: &str) -> FileMetadata {
    FileMetadata {
        language: language_from_path(relpath).to_string(),
        kind: kind_from_path(relpath),
        tags: derive_tags(relpath),
    }
}
