//! Loading source extracts as header-keyed rows.
//!
//! CSV extracts are always supported. Spreadsheet extracts need the `excel`
//! feature.

pub mod csv_rows;
pub mod error;
#[cfg(feature = "excel")]
pub mod excel;
pub mod source;

pub use csv_rows::{read_csv_rows, read_csv_rows_from_reader};
pub use error::{IngestError, Result};
#[cfg(feature = "excel")]
pub use excel::read_sheet_rows;
#[cfg(feature = "excel")]
pub use source::ExcelSource;
pub use source::{CsvSource, MemorySource, RowSource};
