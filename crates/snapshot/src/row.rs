//! Exporter-ready records, one per chunk.

use crate::chunk::Chunk;
use crate::metadata::{self, FileKind, FileMetadata};
use serde::{Deserialize, Serialize};

/// A flattened description of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// `relpath:start-end`
    pub id: String,
    pub relpath: String,
    pub kind: FileKind,
    pub language: String,
    pub start: usize,
    pub end: usize,
    /// UTF-8 length of `text`
    pub bytes: usize,
    pub line_count: usize,
    pub word_count: usize,
    pub est_tokens: usize,
    pub sha256: String,
    pub deps: Vec<String>,
    pub tags: Vec<String>,
    pub profile: String,
    pub text: String,
}

impl Row {
    /// Stable identity for a chunk of a file.
    pub fn make_id(relpath: &str, start: usize, end: usize) -> String {
        format!("{}:{}-{}", relpath, start, end)
    }
}

/// Build the row for `chunk` of the file at `relpath`.
///
/// Pure: the same inputs always produce the same row.
pub fn build_row(
    relpath: &str,
    chunk: &Chunk,
    file: &FileMetadata,
    deps: &[String],
    profile: &str,
) -> Row {
    let text = &chunk.text;

    Row {
        id: Row::make_id(relpath, chunk.start_line, chunk.end_line),
        relpath: relpath.to_string(),
        kind: file.kind,
        language: file.language.clone(),
        start: chunk.start_line,
        end: chunk.end_line,
        bytes: text.len(),
        line_count: metadata::count_lines(text),
        word_count: metadata::count_words(text),
        est_tokens: metadata::estimate_tokens(text),
        sha256: metadata::content_hash(text),
        deps: deps.to_vec(),
        tags: file.tags.clone(),
        profile: profile.to_string(),
        text: text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Chunk, FileMetadata) {
        let chunk = Chunk::new(3, 4, "def f():\n    return 1".to_string());
        (chunk, metadata::classify("src/app/main.py"))
    }

    #[test]
    fn test_build_row() {
        let (chunk, file) = sample();
        let row = build_row("src/app/main.py", &chunk, &file, &["os".to_string()], "minimal");

        assert_eq!(row.id, "src/app/main.py:3-4");
        assert_eq!(row.kind, FileKind::Code);
        assert_eq!(row.language, "python");
        assert_eq!((row.start, row.end), (3, 4));
        assert_eq!(row.bytes, 21);
        assert_eq!(row.line_count, 2);
        assert_eq!(row.word_count, 4);
        assert_eq!(row.est_tokens, 5);
        assert_eq!(row.sha256, metadata::content_hash(&chunk.text));
        assert_eq!(row.deps, vec!["os"]);
        assert_eq!(row.tags, vec!["app"]);
        assert_eq!(row.profile, "minimal");
    }

    #[test]
    fn test_build_row_is_deterministic() {
        let (chunk, file) = sample();
        let a = build_row("src/app/main.py", &chunk, &file, &[], "minimal");
        let b = build_row("src/app/main.py", &chunk, &file, &[], "minimal");
        assert_eq!(a, b);
    }

    #[test]
    fn test_bytes_count_utf8() {
        let chunk = Chunk::new(1, 1, "héllo".to_string());
        let row = build_row("a.txt", &chunk, &metadata::classify("a.txt"), &[], "minimal");
        assert_eq!(row.bytes, 6);
        assert_eq!(row.est_tokens, 1);
    }
}
