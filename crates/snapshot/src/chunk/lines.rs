//! Fixed-size line blocks.

use super::{Chunk, ChunkSplitter};

/// Packs consecutive lines into chunks of at most `max_chars` characters,
/// counting one extra character per line for its newline.
pub struct LineSplitter;

impl ChunkSplitter for LineSplitter {
    fn split(&self, text: &str, max_chars: usize) -> Vec<Chunk> {
        let lines = super::split_lines(text);
        let chunks = chunk_lines(&lines, 1, max_chars);

        tracing::trace!(
            "Line splitter created {} chunks from {} lines",
            chunks.len(),
            lines.len()
        );

        chunks
    }
}

/// Chunk `lines`, numbering the first one `first_line`.
///
/// A line longer than `max_chars` is never cut; it becomes a chunk of its
/// own. An empty slice yields a single empty chunk on `first_line`.
pub(crate) fn chunk_lines(lines: &[&str], first_line: usize, max_chars: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut start = first_line;
    let mut cur_len = 0usize;

    for (offset, &line) in lines.iter().enumerate() {
        let line_no = first_line + offset;
        let add = line.chars().count() + 1;

        if cur_len + add > max_chars && !buf.is_empty() {
            chunks.push(Chunk::new(start, line_no - 1, buf.join("\n")));
            buf.clear();
            start = line_no;
            cur_len = 0;
        }

        buf.push(line);
        cur_len += add;
    }

    if !buf.is_empty() {
        chunks.push(Chunk::new(start, first_line + lines.len() - 1, buf.join("\n")));
    }

    if chunks.is_empty() {
        chunks.push(Chunk::new(first_line, first_line, String::new()));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hundred_lines_two_chunks() {
        let text: String = (1..=100).map(|i| format!("line {:03}\n", i)).collect();
        // Each line is 8 chars + newline = 9; 60 lines fit in 540
        let chunks = LineSplitter.split(&text, 540);

        assert_eq!(chunks.len(), 2);
        assert_eq!((chunks[0].start_line, chunks[0].end_line), (1, 60));
        assert_eq!((chunks[1].start_line, chunks[1].end_line), (61, 100));
        assert!(chunks[0].text.starts_with("line 001"));
        assert!(chunks[1].text.ends_with("line 100"));
    }

    #[test]
    fn test_long_line_gets_own_chunk() {
        let long = "x".repeat(50);
        let text = format!("a\n{}\nb", long);
        let chunks = LineSplitter.split(&text, 10);

        let ranges: Vec<_> = chunks.iter().map(|c| (c.start_line, c.end_line)).collect();
        assert_eq!(ranges, vec![(1, 1), (2, 2), (3, 3)]);
        assert_eq!(chunks[1].text, long);
    }

    #[test]
    fn test_empty_text() {
        let chunks = LineSplitter.split("", 100);
        assert_eq!(chunks, vec![Chunk::new(1, 1, String::new())]);
    }

    #[test]
    fn test_offset_numbering() {
        let chunks = chunk_lines(&["a", "b", "c"], 10, 4);
        let ranges: Vec<_> = chunks.iter().map(|c| (c.start_line, c.end_line)).collect();
        assert_eq!(ranges, vec![(10, 11), (12, 12)]);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let chunks = LineSplitter.split("a\r\nb\r\n", 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "a\nb");
        assert_eq!(chunks[0].end_line, 2);
    }

    proptest! {
        #[test]
        fn prop_chunks_cover_lines_exactly(
            lines in proptest::collection::vec("[a-z ]{0,30}", 1..60),
            max_chars in 1usize..120,
        ) {
            let text = format!("{}\n", lines.join("\n"));
            let chunks = LineSplitter.split(&text, max_chars);

            let mut expected_start = 1;
            let mut rebuilt: Vec<String> = Vec::new();
            for chunk in &chunks {
                prop_assert!(chunk.start_line <= chunk.end_line);
                prop_assert_eq!(chunk.start_line, expected_start);
                expected_start = chunk.end_line + 1;
                rebuilt.extend(chunk.text.split('\n').map(str::to_string));
            }
            prop_assert_eq!(expected_start - 1, lines.len());
            prop_assert_eq!(rebuilt, lines);
        }
    }
}
