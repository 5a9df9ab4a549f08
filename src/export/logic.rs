// src/export/logic.rs

use crate::core::query::QueryLogic;
use crate::core::report::ReportLogic;
use crate::core::students::StudentLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv_report::{export_csv, export_students_csv};
use crate::export::fs_utils::{ensure_writable, resolve_output};
use crate::export::json_report::export_json;
use crate::export::model::{EVENT_REPORT, RECORD_REPORT, Report, ReportRow};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::time::{self, DISPLAY_TS_FORMAT};
use std::path::{Path, PathBuf};

/// High level export operations.
pub struct ExportLogic;

impl ExportLogic {
    /// Build the report of one attendance record (rows ordered by student id).
    pub fn record_report(pool: &mut DbPool, record_id: i64, ts_format: &str) -> AppResult<Report> {
        let summary = ReportLogic::record_summary(pool, record_id)?;
        let rows = QueryLogic::list_by_record(pool, record_id, None)?
            .iter()
            .map(|a| ReportRow::from_attendance(a, None, ts_format))
            .collect();

        Ok(Report {
            kind: RECORD_REPORT,
            title: summary.record.record_name,
            meta: vec![("Event".to_string(), summary.event.event_name)],
            generated: generated_now(),
            summary: summary.counts,
            rows,
            with_record: false,
        })
    }

    /// Build the report of every record of an event.
    pub fn event_report(pool: &mut DbPool, event_id: i64, ts_format: &str) -> AppResult<Report> {
        let ev = ReportLogic::event_attendance(pool, event_id)?;
        let rows = ev
            .rows
            .iter()
            .map(|(name, a)| ReportRow::from_attendance(a, Some(name.clone()), ts_format))
            .collect();

        Ok(Report {
            kind: EVENT_REPORT,
            title: ev.event.event_name.clone(),
            meta: vec![("Event Date".to_string(), ev.event.date_str())],
            generated: generated_now(),
            summary: ev.counts,
            rows,
            with_record: true,
        })
    }

    pub fn export_record(
        pool: &mut DbPool,
        record_id: i64,
        format: ExportFormat,
        file: &str,
        force: bool,
        ts_format: &str,
    ) -> AppResult<PathBuf> {
        let path = resolve_output(file)?;
        let report = Self::record_report(pool, record_id, ts_format)?;
        Self::write_report(pool, &report, format, &path, force)?;
        Ok(path)
    }

    pub fn export_event(
        pool: &mut DbPool,
        event_id: i64,
        format: ExportFormat,
        file: &str,
        force: bool,
        ts_format: &str,
    ) -> AppResult<PathBuf> {
        let path = resolve_output(file)?;
        let report = Self::event_report(pool, event_id, ts_format)?;
        Self::write_report(pool, &report, format, &path, force)?;
        Ok(path)
    }

    /// Student list as CSV, re-importable with `student import`.
    pub fn export_students(pool: &mut DbPool, file: &str, force: bool) -> AppResult<PathBuf> {
        let path = resolve_output(file)?;
        ensure_writable(&path, force)?;

        let students = StudentLogic::list(pool)?;
        export_students_csv(&students, &path)?;

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Students ({} rows)", students.len()),
        )?;
        Ok(path)
    }

    fn write_report(
        pool: &mut DbPool,
        report: &Report,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(path, force)?;

        if report.rows.is_empty() {
            warning("No attendance entries to export, writing headers only.");
        }

        match format {
            ExportFormat::Csv => export_csv(report, path)?,
            ExportFormat::Json => export_json(report, path)?,
            ExportFormat::Xlsx => export_xlsx(report, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} as {} ({} rows)", report.subject(), format.as_str(), report.rows.len()),
        )?;
        Ok(())
    }
}

fn generated_now() -> String {
    time::now().format(DISPLAY_TS_FORMAT).to_string()
}
