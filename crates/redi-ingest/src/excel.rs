#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use redi_model::Row;

use crate::error::{IngestError, Result};

/// Read one worksheet of a workbook (`.xlsx`, `.xls`, `.ods`) into rows keyed by header.
///
/// - `sheet` picks a sheet by name; otherwise the first sheet is used.
/// - `header_row` is the 1-based worksheet row holding the headers; otherwise
///   the first non-empty row is the header.
/// - Rows after the header that are entirely empty are skipped.
pub fn read_sheet_rows(
    path: &Path,
    sheet: Option<&str>,
    header_row: Option<usize>,
) -> Result<Vec<Row>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|err| IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|known| known == name) {
                return Err(IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                });
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestError::EmptyExtract {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| IngestError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    let rows = rows_from_range(&range, header_row).ok_or_else(|| IngestError::EmptyExtract {
        path: path.to_path_buf(),
    })?;
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = rows.len(),
        "read worksheet"
    );
    Ok(rows)
}

fn rows_from_range(range: &Range<Data>, header_row: Option<usize>) -> Option<Vec<Row>> {
    // Worksheet ranges start at the first used cell, not at A1.
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (offset, cells) in range.rows().enumerate() {
        let sheet_row = first_row + offset + 1;
        let Some(header) = headers.as_ref() else {
            let is_header = match header_row {
                Some(wanted) => sheet_row == wanted,
                None => !is_blank(cells),
            };
            if is_header {
                let names: Vec<String> = cells.iter().map(cell_text).collect();
                if names.iter().all(String::is_empty) {
                    return None;
                }
                headers = Some(names);
            }
            continue;
        };
        if is_blank(cells) {
            continue;
        }
        let mut row = Row::new();
        for (idx, name) in header.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let value = cells.get(idx).map(cell_text).unwrap_or_default();
            row.insert(name.clone(), value);
        }
        rows.push(row);
    }
    headers.map(|_| rows)
}

fn is_blank(cells: &[Data]) -> bool {
    cells.iter().all(|cell| cell_text(cell).is_empty())
}

/// Cell contents as trimmed text. Integral floats drop the trailing `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => {
            if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                (*value as i64).to_string()
            } else {
                value.to_string()
            }
        }
        Data::Bool(value) => value.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
