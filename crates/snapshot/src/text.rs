//! Text file detection.
//!
//! Decides whether a filesystem entry is snapshotted as text, first by
//! extension and then by sniffing a short prefix of the content.

use paleae_core::config::DEFAULT_MAX_FILE_SIZE;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Extensions that are always treated as text without reading the file.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "py", "md", "rst", "txt", "json", "yaml", "yml", "toml", "ini", "cfg", "xml", "csv", "tsv",
    "html", "css", "js", "ts", "tsx", "c", "h", "cpp", "hpp", "java", "kt", "go", "rs", "rb",
    "php", "sh", "ps1",
];

/// Number of leading bytes inspected for binary content.
const SNIFF_LEN: usize = 1024;

/// Text/binary heuristic.
#[derive(Debug, Clone)]
pub struct TextClassifier {
    max_file_size: u64,
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl TextClassifier {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Whether `path` is a regular file holding text.
    ///
    /// Never fails: permission errors and files that vanish between listing
    /// and inspection are reported as "not text".
    pub fn is_text(&self, path: &Path) -> bool {
        let metadata = match fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return false,
            Err(e) => {
                tracing::debug!("Cannot stat {:?}: {}", path, e);
                return false;
            }
        };

        let extension = lowercase_extension(path);
        if extension
            .as_deref()
            .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext))
        {
            return true;
        }

        let size = metadata.len();
        if size == 0 && extension.is_none() {
            return true;
        }
        if size > self.max_file_size {
            tracing::debug!("Skipping {:?}: {} bytes exceeds limit", path, size);
            return false;
        }

        match sniff(path) {
            Ok(is_text) => is_text,
            Err(e) => {
                tracing::debug!("Cannot read {:?}: {}", path, e);
                false
            }
        }
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Inspect the first bytes of a file.
fn sniff(path: &Path) -> std::io::Result<bool> {
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)?;

    Ok(looks_like_text(&prefix))
}

/// Binary when a NUL byte is present or the bytes are not UTF-8.
///
/// Any decode failure counts, including a multi-byte character cut off by
/// the end of the prefix.
pub fn looks_like_text(prefix: &[u8]) -> bool {
    !prefix.contains(&0) && std::str::from_utf8(prefix).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_known_extension_short_circuits() {
        let temp = TempDir::new().unwrap();
        // Content is binary, but the extension wins
        let path = write(&temp, "data.json", b"\x00\x01\x02");
        assert!(TextClassifier::default().is_text(&path));
    }

    #[test]
    fn test_known_extension_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "README.MD", b"# hi");
        assert!(TextClassifier::default().is_text(&path));
    }

    #[test]
    fn test_unknown_extension_is_sniffed() {
        let temp = TempDir::new().unwrap();
        let text = write(&temp, "app.log", b"started\n");
        let binary = write(&temp, "image.bin", b"PNG\x00\x00IHDR");
        let latin1 = write(&temp, "legacy.dat", b"caf\xe9 au lait");

        let classifier = TextClassifier::default();
        assert!(classifier.is_text(&text));
        assert!(!classifier.is_text(&binary));
        assert!(!classifier.is_text(&latin1));
    }

    #[test]
    fn test_empty_files() {
        let temp = TempDir::new().unwrap();
        let no_ext = write(&temp, "LICENSE", b"");
        let other_ext = write(&temp, "empty.lock", b"");

        let classifier = TextClassifier::default();
        assert!(classifier.is_text(&no_ext));
        assert!(classifier.is_text(&other_ext));
    }

    #[test]
    fn test_size_limit() {
        let temp = TempDir::new().unwrap();
        let big = write(&temp, "big.log", &[b'a'; 64]);
        let listed = write(&temp, "big.txt", &[b'a'; 64]);

        let classifier = TextClassifier::new(32);
        assert!(!classifier.is_text(&big));
        // Allow-listed extensions are decided before the size check
        assert!(classifier.is_text(&listed));
    }

    #[test]
    fn test_not_a_regular_file() {
        let temp = TempDir::new().unwrap();
        let classifier = TextClassifier::default();
        assert!(!classifier.is_text(temp.path()));
        assert!(!classifier.is_text(&temp.path().join("missing.txt")));
    }

    #[test]
    fn test_looks_like_text() {
        assert!(looks_like_text("plain é text".as_bytes()));
        // "é" is 0xC3 0xA9; cut after the first byte
        assert!(!looks_like_text(b"abc\xc3"));
        assert!(!looks_like_text(b"abc\xff"));
        assert!(!looks_like_text(b"a\x00b"));
    }

    #[test]
    fn test_multibyte_across_sniff_boundary() {
        let temp = TempDir::new().unwrap();
        let mut bytes = vec![b'a'; SNIFF_LEN - 1];
        bytes.extend_from_slice("é and more".as_bytes());
        let path = write(&temp, "notes.log", &bytes);
        // The sniffed prefix ends inside "é", which is a decode failure
        assert!(!TextClassifier::default().is_text(&path));
    }
}
