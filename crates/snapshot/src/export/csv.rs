//! CSV writer with a fixed column order.

use paleae_core::{AppError, AppResult};
use std::io::Write;

use crate::row::Row;

/// Header row, in output order.
pub const CSV_COLUMNS: [&str; 15] = [
    "id",
    "relpath",
    "kind",
    "language",
    "start",
    "end",
    "bytes",
    "line_count",
    "word_count",
    "est_tokens",
    "sha256",
    "deps",
    "tags",
    "profile",
    "text",
];

/// Every field quoted; list fields joined with `;`.
pub fn write_csv(w: &mut dyn Write, rows: &[Row]) -> AppResult<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Always)
        .from_writer(w);

    writer.write_record(CSV_COLUMNS).map_err(csv_error)?;

    for row in rows {
        let start = row.start.to_string();
        let end = row.end.to_string();
        let bytes = row.bytes.to_string();
        let line_count = row.line_count.to_string();
        let word_count = row.word_count.to_string();
        let est_tokens = row.est_tokens.to_string();
        let deps = row.deps.join(";");
        let tags = row.tags.join(";");

        writer
            .write_record([
                row.id.as_str(),
                row.relpath.as_str(),
                row.kind.as_str(),
                row.language.as_str(),
                start.as_str(),
                end.as_str(),
                bytes.as_str(),
                line_count.as_str(),
                word_count.as_str(),
                est_tokens.as_str(),
                row.sha256.as_str(),
                deps.as_str(),
                tags.as_str(),
                row.profile.as_str(),
                row.text.as_str(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

fn csv_error(err: ::csv::Error) -> AppError {
    AppError::Serialization(err.to_string())
}
