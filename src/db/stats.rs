//! Simple counters over the whole database.

use crate::db::{events, records, students};
use crate::errors::AppResult;
use crate::models::AttendanceStatus;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

/// Present / Absent / Excused counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub present: usize,
    pub absent: usize,
    pub excused: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.present + self.absent + self.excused
    }

    pub fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Excused => self.excused += 1,
        }
    }

    pub fn from_statuses<I: IntoIterator<Item = AttendanceStatus>>(it: I) -> Self {
        let mut c = Self::default();
        for s in it {
            c.add(s);
        }
        c
    }
}

/// Status counters over every attendance row.
pub fn status_counts(conn: &Connection) -> AppResult<StatusCounts> {
    let mut stmt = conn.prepare_cached("SELECT status, COUNT(*) FROM Attendance GROUP BY status")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut counts = StatusCounts::default();
    for r in rows {
        let (status, n) = r?;
        let n = n as usize;
        match AttendanceStatus::from_db_str(&status) {
            Some(AttendanceStatus::Present) => counts.present += n,
            Some(AttendanceStatus::Absent) => counts.absent += n,
            Some(AttendanceStatus::Excused) => counts.excused += n,
            None => {}
        }
    }
    Ok(counts)
}

/// Rows stamped on or after midnight of `day`.
pub fn stamped_since(conn: &Connection, day: &NaiveDate) -> AppResult<i64> {
    // Stored stamps start with YYYY-MM-DD, so a text comparison is enough.
    let n = conn.query_row(
        "SELECT COUNT(*) FROM Attendance WHERE timestamp IS NOT NULL AND timestamp >= ?1",
        [day.format("%Y-%m-%d").to_string()],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Whole-database counters for the summary report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DbTotals {
    pub students: i64,
    pub events: i64,
    pub records: i64,
}

pub fn totals(conn: &Connection) -> AppResult<DbTotals> {
    Ok(DbTotals {
        students: students::count_students(conn)?,
        events: events::count_events(conn)?,
        records: records::count_records(conn)?,
    })
}
