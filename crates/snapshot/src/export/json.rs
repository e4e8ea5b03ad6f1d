//! JSON and JSON Lines writers.

use paleae_core::AppResult;
use serde::Serialize;
use std::io::Write;

use crate::row::Row;
use crate::types::SnapshotMeta;

#[derive(Serialize)]
struct Document<'a> {
    meta: &'a SnapshotMeta,
    rows: &'a [Row],
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Line<'a> {
    Meta(&'a SnapshotMeta),
    Row(&'a Row),
}

/// `{"meta": ..., "rows": [...]}`, pretty printed.
pub fn write_json(w: &mut dyn Write, meta: &SnapshotMeta, rows: &[Row]) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *w, &Document { meta, rows })?;
    writeln!(w)?;
    Ok(())
}

/// One meta line, then one line per row.
pub fn write_jsonl(w: &mut dyn Write, meta: &SnapshotMeta, rows: &[Row]) -> AppResult<()> {
    serde_json::to_writer(&mut *w, &Line::Meta(meta))?;
    writeln!(w)?;

    for row in rows {
        serde_json::to_writer(&mut *w, &Line::Row(row))?;
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::{sample_meta, sample_rows};

    #[test]
    fn test_write_json() {
        let rows = sample_rows();
        let mut out = Vec::new();
        write_json(&mut out, &sample_meta(&rows), &rows).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["meta"]["tool"], "paleae");
        assert_eq!(value["meta"]["counts"]["rows"], 2);
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["rows"][0]["id"], "src/main.py:1-2");
        assert_eq!(value["rows"][0]["kind"], "code");
        assert_eq!(value["rows"][0]["deps"][0], "os");
    }

    #[test]
    fn test_write_jsonl() {
        let rows = sample_rows();
        let mut out = Vec::new();
        write_jsonl(&mut out, &sample_meta(&rows), &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "meta");
        assert_eq!(lines[0]["profile"], "minimal");
        assert_eq!(lines[1]["type"], "row");
        assert_eq!(lines[2]["relpath"], "README.md");
    }
}
