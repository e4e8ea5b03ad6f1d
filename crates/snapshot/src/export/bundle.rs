//! Zip bundle holding the JSON and Markdown renderings of one snapshot.

use paleae_core::{AppError, AppResult};
use std::io::{Cursor, Write};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::json::write_json;
use super::markdown::write_markdown;
use crate::row::Row;
use crate::types::SnapshotMeta;

pub const BUNDLE_JSON: &str = "snapshot.json";
pub const BUNDLE_MARKDOWN: &str = "SNAPSHOT.md";

pub fn write_zip(w: &mut dyn Write, meta: &SnapshotMeta, rows: &[Row]) -> AppResult<()> {
    let mut json = Vec::new();
    write_json(&mut json, meta, rows)?;
    let mut markdown = Vec::new();
    write_markdown(&mut markdown, meta, rows)?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in [(BUNDLE_JSON, &json), (BUNDLE_MARKDOWN, &markdown)] {
        archive.start_file(name, options).map_err(zip_error)?;
        archive.write_all(data)?;
    }
    let cursor = archive.finish().map_err(zip_error)?;

    w.write_all(cursor.get_ref())?;
    Ok(())
}

fn zip_error(err: ZipError) -> AppError {
    AppError::Serialization(format!("zip: {}", err))
}
