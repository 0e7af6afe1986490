//! Timetable workbook writer.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use super::IoError;
use crate::models::{CourseSummary, Timetable};
use crate::scheduler::CompletionReport;

/// File name used when no output path is given.
pub const DEFAULT_EXPORT_FILE: &str = "Final_Timetable.xlsx";

/// Writes the timetable and its summary to an `.xlsx` file.
///
/// Sheet `Timetable` holds one row per session in allocation order, with a
/// `Block` column only when blocks were used. Sheet `Summary` holds the
/// course table followed by the completion figures.
pub fn write_timetable_xlsx(
    path: impl AsRef<Path>,
    timetable: &Timetable,
    courses: &[CourseSummary],
    report: &CompletionReport,
) -> Result<(), IoError> {
    let path = path.as_ref();
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    write_sessions(workbook.add_worksheet(), timetable, &header)?;
    write_summary(workbook.add_worksheet(), courses, report, &header)?;
    workbook.save(path)?;

    info!(path = %path.display(), sessions = timetable.len(), "timetable exported");
    Ok(())
}

fn write_sessions(sheet: &mut Worksheet, timetable: &Timetable, header: &Format) -> Result<(), XlsxError> {
    sheet.set_name("Timetable")?;

    let mut columns = vec!["Section", "Week", "Day", "Slot", "Room"];
    let with_blocks = timetable.uses_blocks();
    if with_blocks {
        columns.push("Block");
    }
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    sheet.set_column_width(0, 16)?;
    sheet.set_freeze_panes(1, 0)?;

    for (i, s) in timetable.sessions.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &s.section_id)?;
        sheet.write_number(row, 1, s.week)?;
        sheet.write_number(row, 2, s.day)?;
        sheet.write_number(row, 3, s.slot)?;
        sheet.write_number(row, 4, s.room)?;
        if let Some(block) = s.block {
            sheet.write_number(row, 5, block)?;
        }
    }
    Ok(())
}

fn write_summary(
    sheet: &mut Worksheet,
    courses: &[CourseSummary],
    report: &CompletionReport,
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name("Summary")?;

    for (col, title) in ["Course", "Enrollment", "Sections Created"].iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    sheet.set_column_width(0, 20)?;

    for (i, c) in courses.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &c.course)?;
        sheet.write_number(row, 1, c.enrollment as f64)?;
        sheet.write_number(row, 2, c.sections_created as f64)?;
    }

    // One blank row between the course table and the totals
    let mut row = courses.len() as u32 + 2;
    let figures = [
        ("Required Sessions", report.required_sessions as f64),
        ("Scheduled Sessions", report.scheduled_sessions as f64),
        ("Completion Rate (%)", report.completion_rate),
    ];
    for (label, value) in figures {
        sheet.write_string_with_format(row, 0, label, header)?;
        sheet.write_number(row, 1, value)?;
        row += 1;
    }
    Ok(())
}
