use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use redi_model::Row;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn is_blank_record(record: &csv::StringRecord) -> bool {
    record
        .iter()
        .all(|value| value.trim().trim_matches('\u{feff}').is_empty())
}

/// Read a CSV extract into rows keyed by header.
///
/// Extracts exported from the reporting portals start with a BOM and a few
/// blank lines, so the first non-blank line is taken as the header. Headers
/// have inner whitespace collapsed, cells are trimmed, fully blank rows are
/// dropped, and short rows are padded with empty cells.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Row>> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| IngestError::from_csv(path, &err))?;
    let rows = collect_rows(reader, path)?;
    debug!(path = %path.display(), rows = rows.len(), "read csv extract");
    Ok(rows)
}

/// Same as [`read_csv_rows`] over an in-memory reader; `origin` labels errors.
pub fn read_csv_rows_from_reader<R: Read>(reader: R, origin: &Path) -> Result<Vec<Row>> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    collect_rows(reader, origin)
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Vec<Row>> {
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| IngestError::from_csv(path, &err))?;
        if is_blank_record(&record) {
            continue;
        }
        let Some(header) = headers.as_ref() else {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        };
        let mut row = Row::new();
        for (idx, name) in header.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let value = record.get(idx).unwrap_or("");
            row.insert(name.clone(), normalize_cell(value));
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header("\u{feff}Person   Person No. "), "Person Person No.");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn pads_short_rows() {
        let data = "A,B,C\n1,2\n";
        let rows = read_csv_rows_from_reader(data.as_bytes(), Path::new("inline.csv")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("C"), Some(""));
    }
}
