//! Spreadsheet writer.
//!
//! The workbook has a `snapgrid` sheet with one row per chunk, in the CSV
//! column order, and a `run_meta` sheet of key/value pairs.

use paleae_core::{AppError, AppResult};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::io::Write;

use super::csv::CSV_COLUMNS;
use crate::row::Row;
use crate::types::SnapshotMeta;

pub const ROWS_SHEET: &str = "snapgrid";
pub const META_SHEET: &str = "run_meta";

/// Longest string a single cell can hold.
pub const MAX_CELL_CHARS: usize = 32_767;

pub fn write_xlsx(w: &mut dyn Write, meta: &SnapshotMeta, rows: &[Row]) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(ROWS_SHEET).map_err(xlsx_error)?;
    for (col, name) in CSV_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet
            .write_string_with_format(0, col, *name, &header)
            .map_err(xlsx_error)?;
        sheet
            .set_column_width(col, column_width(name))
            .map_err(xlsx_error)?;
    }
    for (i, row) in rows.iter().enumerate() {
        write_row(sheet, i as u32 + 1, row).map_err(xlsx_error)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(META_SHEET).map_err(xlsx_error)?;
    sheet.set_column_width(0, 16.0).map_err(xlsx_error)?;
    sheet.set_column_width(1, 60.0).map_err(xlsx_error)?;
    let entries = [
        ("tool", meta.tool.clone()),
        ("version", meta.version.clone()),
        ("root", meta.root.clone()),
        ("profile", meta.profile.clone()),
        ("chunk_by", meta.chunk_by.clone()),
        ("max_chars", meta.max_chars.to_string()),
        ("ts", meta.ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        ("ignore_file", serde_json::to_string(&meta.ignore_file)?),
        ("counts", serde_json::to_string(&meta.counts)?),
    ];
    for (i, (key, value)) in entries.iter().enumerate() {
        let r = i as u32;
        sheet.write_string(r, 0, *key).map_err(xlsx_error)?;
        sheet.write_string(r, 1, value.as_str()).map_err(xlsx_error)?;
    }

    let buffer = workbook.save_to_buffer().map_err(xlsx_error)?;
    w.write_all(&buffer)?;
    Ok(())
}

fn write_row(sheet: &mut Worksheet, r: u32, row: &Row) -> Result<(), XlsxError> {
    let text = clip(&row.text);
    if text.len() < row.text.len() {
        tracing::debug!("Clipped {} to {} chars for xlsx", row.id, MAX_CELL_CHARS);
    }

    sheet.write_string(r, 0, row.id.as_str())?;
    sheet.write_string(r, 1, row.relpath.as_str())?;
    sheet.write_string(r, 2, row.kind.as_str())?;
    sheet.write_string(r, 3, row.language.as_str())?;
    sheet.write_number(r, 4, row.start as f64)?;
    sheet.write_number(r, 5, row.end as f64)?;
    sheet.write_number(r, 6, row.bytes as f64)?;
    sheet.write_number(r, 7, row.line_count as f64)?;
    sheet.write_number(r, 8, row.word_count as f64)?;
    sheet.write_number(r, 9, row.est_tokens as f64)?;
    sheet.write_string(r, 10, row.sha256.as_str())?;
    sheet.write_string(r, 11, row.deps.join(";"))?;
    sheet.write_string(r, 12, row.tags.join(";"))?;
    sheet.write_string(r, 13, row.profile.as_str())?;
    sheet.write_string(r, 14, text)?;
    Ok(())
}

fn column_width(name: &str) -> f64 {
    match name {
        "text" => 80.0,
        "id" | "relpath" | "deps" => 40.0,
        _ => 12.0,
    }
}

/// Cut `text` to at most [`MAX_CELL_CHARS`] characters.
fn clip(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn xlsx_error(err: XlsxError) -> AppError {
    AppError::Serialization(format!("xlsx: {}", err))
}
