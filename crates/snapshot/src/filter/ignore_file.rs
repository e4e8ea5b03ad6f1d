//! `.paleaeignore` parsing.

use std::fs;
use std::path::Path;

/// Name of the per-repository ignore file looked up at the scan root.
pub const IGNORE_FILE_NAME: &str = ".paleaeignore";

/// Glob lines read from the ignore file.
///
/// `negative` lines come from `!`-prefixed entries and only override an
/// exclusion; they never include a file on their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreLines {
    /// Whether the ignore file existed and was read
    pub present: bool,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl IgnoreLines {
    /// True when the file was absent, unreadable or had no rules.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Read `<root>/.paleaeignore`.
///
/// A missing file yields empty lines. A file that exists but cannot be read
/// is reported with a warning and also yields empty lines; it never aborts
/// the scan.
pub fn read_ignore_file(root: &Path) -> IgnoreLines {
    let path = root.join(IGNORE_FILE_NAME);
    if !path.is_file() {
        tracing::debug!("No {} at {:?}", IGNORE_FILE_NAME, root);
        return IgnoreLines::default();
    }

    match fs::read(&path) {
        Ok(bytes) => {
            let mut lines = parse_ignore_lines(&String::from_utf8_lossy(&bytes));
            lines.present = true;
            tracing::debug!(
                "Read {}: {} patterns, {} negations",
                IGNORE_FILE_NAME,
                lines.positive.len(),
                lines.negative.len()
            );
            lines
        }
        Err(e) => {
            tracing::warn!("Could not read {:?}: {}", path, e);
            IgnoreLines::default()
        }
    }
}

/// Split ignore-file text into positive and negated glob lines.
pub fn parse_ignore_lines(contents: &str) -> IgnoreLines {
    let mut lines = IgnoreLines::default();

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.strip_prefix('!') {
            Some(negated) => lines.negative.push(negated.trim().to_string()),
            None => lines.positive.push(line.to_string()),
        }
    }

    lines
}
