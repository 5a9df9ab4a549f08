//! Summaries over records, events and the whole database.

use crate::db::attendance;
use crate::db::events;
use crate::db::pool::DbPool;
use crate::db::records;
use crate::db::stats::{self, DbTotals, StatusCounts};
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, AttendanceRecord, Event};
use crate::utils::date;

/// Counts for a single record.
#[derive(Debug, Clone)]
pub struct RecordSummary {
    pub record: AttendanceRecord,
    pub event: Event,
    pub counts: StatusCounts,
}

impl RecordSummary {
    /// Present / total as a percentage, 0 on an empty record.
    pub fn present_rate(&self) -> f64 {
        let total = self.counts.total();
        if total == 0 {
            0.0
        } else {
            self.counts.present as f64 * 100.0 / total as f64
        }
    }
}

/// Attendance of every record of one event.
#[derive(Debug, Clone)]
pub struct EventAttendance {
    pub event: Event,
    pub rows: Vec<(String, Attendance)>,
    pub counts: StatusCounts,
}

/// Whole-database dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverallSummary {
    pub totals: DbTotals,
    pub counts: StatusCounts,
    pub stamped_today: i64,
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn record_summary(pool: &mut DbPool, record_id: i64) -> AppResult<RecordSummary> {
        let conn = &pool.conn;

        let record = records::get_record(conn, record_id)?
            .ok_or(AppError::RecordNotFound(record_id))?;
        let event = events::get_event(conn, record.event_id)?
            .ok_or(AppError::EventNotFound(record.event_id))?;

        let rows = attendance::list_by_record(conn, record_id, None)?;
        let counts = StatusCounts::from_statuses(rows.iter().map(|a| a.status));

        Ok(RecordSummary {
            record,
            event,
            counts,
        })
    }

    pub fn event_attendance(pool: &mut DbPool, event_id: i64) -> AppResult<EventAttendance> {
        let conn = &pool.conn;

        let event = events::get_event(conn, event_id)?.ok_or(AppError::EventNotFound(event_id))?;
        let rows = attendance::list_by_event(conn, event_id)?;
        let counts = StatusCounts::from_statuses(rows.iter().map(|(_, a)| a.status));

        Ok(EventAttendance { event, rows, counts })
    }

    pub fn overall(pool: &mut DbPool) -> AppResult<OverallSummary> {
        let conn = &pool.conn;

        Ok(OverallSummary {
            totals: stats::totals(conn)?,
            counts: stats::status_counts(conn)?,
            stamped_today: stats::stamped_since(conn, &date::today())?,
        })
    }
}
