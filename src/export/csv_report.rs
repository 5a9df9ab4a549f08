// src/export/csv_report.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::Report;
use crate::export::notify_export_success;
use crate::models::Student;
use crate::ui::messages::info;
use std::io::Write;
use std::path::Path;

fn csv_err(e: csv::Error) -> AppError {
    AppError::Export(format!("CSV write error: {e}"))
}

/// Report as CSV: preamble rows, a blank line, then the table.
///
/// ```text
/// Attendance Record Report,Morning
/// Event,Orientation
/// Generated,2025-03-05 09:12:44
///
/// Student ID,First Name,Year Level,Course,Status,Timestamp
/// ```
pub(crate) fn export_csv(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    wtr.write_record([report.kind, report.title.as_str()])
        .map_err(csv_err)?;
    for (k, v) in &report.meta {
        wtr.write_record([k, v]).map_err(csv_err)?;
    }
    wtr.write_record(["Generated", report.generated.as_str()])
        .map_err(csv_err)?;

    // csv writes an empty record as `""`, so the separator goes straight to the file
    let mut file = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV write error: {}", e.error())))?;
    file.write_all(b"\n")?;

    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);
    wtr.write_record(report.headers()).map_err(csv_err)?;
    for row in &report.rows {
        wtr.write_record(row.cells(report.with_record))
            .map_err(csv_err)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}

/// Student list in the same four-column layout accepted by `student import`.
pub(crate) fn export_students_csv(students: &[Student], path: &Path) -> AppResult<()> {
    info(format!("Exporting students to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    wtr.write_record(["student_id", "fname", "year_level", "course"])
        .map_err(csv_err)?;
    for s in students {
        wtr.write_record([&s.student_id, &s.fname, &s.year_level, &s.course])
            .map_err(csv_err)?;
    }
    wtr.flush()?;

    notify_export_success("Students CSV", path);
    Ok(())
}
