//! Row sources: anything that can produce the rows of one extract.

use std::path::PathBuf;

use redi_model::Row;

use crate::csv_rows::read_csv_rows;
use crate::error::Result;

/// A named extract that loads into header-keyed rows.
///
/// Loading happens once per pipeline run. A failure is scoped to this source.
pub trait RowSource {
    /// Label used in logs and warnings.
    fn name(&self) -> &str;

    fn load(&self) -> Result<Vec<Row>>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<Vec<Row>> {
        (**self).load()
    }
}

/// A CSV extract on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    name: String,
    path: PathBuf,
}

impl CsvSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl RowSource for CsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Row>> {
        read_csv_rows(&self.path)
    }
}

/// One worksheet of a spreadsheet extract on disk.
#[cfg(feature = "excel")]
#[derive(Debug, Clone)]
pub struct ExcelSource {
    name: String,
    path: PathBuf,
    sheet: Option<String>,
    header_row: Option<usize>,
}

#[cfg(feature = "excel")]
impl ExcelSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            sheet: None,
            header_row: None,
        }
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// 1-based worksheet row holding the headers.
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = Some(header_row);
        self
    }
}

#[cfg(feature = "excel")]
impl RowSource for ExcelSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Row>> {
        crate::excel::read_sheet_rows(&self.path, self.sheet.as_deref(), self.header_row)
    }
}

/// Rows already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    rows: Vec<Row>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RowSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Row>> {
        Ok(self.rows.clone())
    }
}
