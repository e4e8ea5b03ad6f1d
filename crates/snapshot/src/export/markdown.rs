//! Markdown writer for human review.

use paleae_core::AppResult;
use std::io::Write;

use crate::row::Row;
use crate::types::SnapshotMeta;

pub fn write_markdown(w: &mut dyn Write, meta: &SnapshotMeta, rows: &[Row]) -> AppResult<()> {
    writeln!(w, "# paleae Snapshot (v{})", meta.version)?;
    writeln!(w)?;
    writeln!(w, "## Run Meta")?;
    writeln!(w)?;
    writeln!(w, "- **tool**: {}", meta.tool)?;
    writeln!(w, "- **version**: {}", meta.version)?;
    writeln!(w, "- **root**: {}", meta.root)?;
    writeln!(w, "- **profile**: {}", meta.profile)?;
    writeln!(w, "- **chunk_by**: {}", meta.chunk_by)?;
    writeln!(w, "- **max_chars**: {}", meta.max_chars)?;
    writeln!(w, "- **ts**: {}", meta.ts.format("%Y-%m-%dT%H:%M:%SZ"))?;
    writeln!(
        w,
        "- **ignore_file**: {} (present: {}, patterns: {}, negations: {})",
        meta.ignore_file.file,
        meta.ignore_file.present,
        meta.ignore_file.patterns,
        meta.ignore_file.negations
    )?;
    writeln!(
        w,
        "- **counts**: files {}, rows {}, chars {}, est_tokens {}",
        meta.counts.files, meta.counts.rows, meta.counts.total_chars, meta.counts.estimated_tokens
    )?;
    writeln!(w)?;
    writeln!(w, "---")?;
    writeln!(w)?;

    for row in rows {
        writeln!(
            w,
            "## `{}` [{}-{}] — {}/{}",
            row.relpath, row.start, row.end, row.kind, row.language
        )?;
        writeln!(w)?;
        writeln!(w, "- id: `{}`  ", row.id)?;
        writeln!(w, "- bytes: {}  ", row.bytes)?;
        writeln!(w, "- lines: {}  ", row.line_count)?;
        writeln!(w, "- words: {}  ", row.word_count)?;
        writeln!(w, "- est_tokens: {}  ", row.est_tokens)?;
        writeln!(w, "- sha256: `{}`  ", row.sha256)?;
        if !row.deps.is_empty() {
            writeln!(w, "- deps: `{}`  ", row.deps.join(";"))?;
        }
        if !row.tags.is_empty() {
            writeln!(w, "- tags: `{}`  ", row.tags.join(";"))?;
        }
        writeln!(w)?;
        writeln!(w, "{}text", fence(&row.text))?;
        writeln!(w, "{}", row.text)?;
        writeln!(w, "{}", fence(&row.text))?;
        writeln!(w)?;
    }

    Ok(())
}

/// A backtick fence longer than any backtick run inside `text`.
fn fence(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::{sample_meta, sample_rows};

    #[test]
    fn test_write_markdown() {
        let rows = sample_rows();
        let mut out = Vec::new();
        write_markdown(&mut out, &sample_meta(&rows), &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# paleae Snapshot (v"));
        assert!(text.contains("- **profile**: minimal"));
        assert!(text.contains("## `src/main.py` [1-2] — code/python"));
        assert!(text.contains("- deps: `os;sys`"));
        assert!(text.contains("```text\nimport os\nimport sys\n```"));
    }

    #[test]
    fn test_fence_outgrows_backticks() {
        assert_eq!(fence("plain"), "```");
        assert_eq!(fence("has ``` inside"), "````");
    }
}
