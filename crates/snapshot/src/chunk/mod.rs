//! Splitting file content into addressable line ranges.
//!
//! Every strategy honors the same contract: chunks are ordered, contiguous,
//! never overlap, and together reproduce the file's line sequence.

mod detection;
mod lines;
mod structural;

pub use detection::Language;
pub use lines::LineSplitter;
pub use structural::StructuralSplitter;

use paleae_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One contiguous, 1-based inclusive line range of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(start_line: usize, end_line: usize, text: String) -> Self {
        debug_assert!(start_line <= end_line);
        Self {
            start_line,
            end_line,
            text,
        }
    }
}

/// Trait for chunk splitters.
pub trait ChunkSplitter {
    /// Split text into ordered chunks of at most `max_chars` characters,
    /// except where a single line is longer than that.
    fn split(&self, text: &str, max_chars: usize) -> Vec<Chunk>;
}

/// How file content is cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// One chunk per file, unless the file exceeds `max_chars`
    WholeFile,
    /// Consecutive lines packed up to `max_chars`
    FixedLines,
    /// Top-level definitions of a recognized language
    Structural,
}

impl ChunkStrategy {
    /// Resolve a command-line name.
    ///
    /// `functions` and `classes` both select top-level definitions.
    pub fn from_name(name: &str) -> AppResult<Self> {
        match name.trim() {
            "file" | "whole_file" => Ok(ChunkStrategy::WholeFile),
            "lines" | "fixed_lines" => Ok(ChunkStrategy::FixedLines),
            "functions" | "classes" | "structural" => Ok(ChunkStrategy::Structural),
            other => Err(AppError::Config(format!(
                "Unknown chunk strategy '{}' (expected one of: file, lines, functions, classes)",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChunkStrategy::WholeFile => "whole_file",
            ChunkStrategy::FixedLines => "fixed_lines",
            ChunkStrategy::Structural => "structural",
        }
    }
}

/// Keeps the file in one piece when it fits.
pub struct WholeFileSplitter;

impl ChunkSplitter for WholeFileSplitter {
    fn split(&self, text: &str, max_chars: usize) -> Vec<Chunk> {
        if text.chars().count() > max_chars {
            return LineSplitter.split(text, max_chars);
        }

        // Same line model as the other strategies
        let lines = split_lines(text);
        vec![Chunk::new(1, lines.len().max(1), lines.join("\n"))]
    }
}

/// Split `text` with the splitter selected by `strategy`.
pub fn split(text: &str, strategy: ChunkStrategy, language: Language, max_chars: usize) -> Vec<Chunk> {
    match strategy {
        ChunkStrategy::WholeFile => WholeFileSplitter.split(text, max_chars),
        ChunkStrategy::FixedLines => LineSplitter.split(text, max_chars),
        ChunkStrategy::Structural => StructuralSplitter::new(language).split(text, max_chars),
    }
}

/// Lines of `text`: split on `\n`, trailing `\r` removed. A final newline
/// does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
