//! Roster workbook reader.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use super::IoError;
use crate::models::{CourseRoster, RosterBook};

/// Renders a cell as text. Integral floats lose their fraction.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                format!("{f:.0}")
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

/// Builds a roster from sheet rows, skipping the header row.
///
/// Only the first column is read; rows with a blank first cell are dropped.
pub fn roster_from_rows<'a, I>(course: impl Into<String>, rows: I) -> CourseRoster
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let cells = rows
        .into_iter()
        .skip(1)
        .filter_map(|row| row.first())
        .map(cell_to_string);
    CourseRoster::from_cells(course, cells)
}

/// Reads every sheet of a workbook as one course roster.
///
/// Sheet names become course names, in workbook order.
pub fn read_roster_workbook(path: impl AsRef<Path>) -> Result<RosterBook, IoError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let names = workbook.sheet_names().to_owned();
    if names.is_empty() {
        return Err(IoError::EmptyWorkbook(path.to_path_buf()));
    }

    let mut book = RosterBook::new();
    for sheet in names {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|source| IoError::Sheet {
                sheet: sheet.clone(),
                source,
            })?;
        let roster = roster_from_rows(sheet.as_str(), range.rows());
        debug!(course = %roster.course, students = roster.len(), "roster read");
        book.insert(roster);
    }

    info!(path = %path.display(), courses = book.len(), "roster workbook loaded");
    Ok(book)
}
