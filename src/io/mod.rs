//! Spreadsheet input and output.
//!
//! - [`read_roster_workbook`]: one sheet per course, student ids in the
//!   first column, first row treated as a header.
//! - [`write_timetable_xlsx`]: `Timetable` and `Summary` sheets, by default
//!   saved as [`DEFAULT_EXPORT_FILE`].

mod export;
mod roster;

use std::path::PathBuf;

use thiserror::Error;

pub use export::{write_timetable_xlsx, DEFAULT_EXPORT_FILE};
pub use roster::{cell_to_string, read_roster_workbook, roster_from_rows};

/// Errors raised while reading or writing workbooks.
#[derive(Debug, Error)]
pub enum IoError {
    /// The workbook could not be opened.
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// A sheet could not be read.
    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    /// The workbook has no sheets.
    #[error("workbook {0} contains no sheets")]
    EmptyWorkbook(PathBuf),

    /// Writing the export failed.
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
