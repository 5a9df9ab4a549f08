//! Attendance table: one row per (record, student).

use crate::db::opt_ts_column;
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, AttendanceStatus, Student};
use crate::utils::time;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const COLUMNS: &str = "attendance_id, record_id, student_id, student_fname, \
                       student_year_level, student_course, status, timestamp";

pub fn map_row(row: &Row) -> Result<Attendance> {
    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Attendance {
        attendance_id: row.get("attendance_id")?,
        record_id: row.get("record_id")?,
        student_id: row.get("student_id")?,
        student_fname: row.get("student_fname")?,
        student_year_level: row.get("student_year_level")?,
        student_course: row.get("student_course")?,
        status,
        timestamp: opt_ts_column(row, "timestamp")?,
    })
}

pub fn get_attendance(
    conn: &Connection,
    record_id: i64,
    student_id: &str,
) -> AppResult<Option<Attendance>> {
    let sql = format!("SELECT {COLUMNS} FROM Attendance WHERE record_id = ?1 AND student_id = ?2");
    let att = conn
        .prepare_cached(&sql)?
        .query_row(params![record_id, student_id], map_row)
        .optional()?;
    Ok(att)
}

/// Rows of a record ordered by student id, optionally only one status.
pub fn list_by_record(
    conn: &Connection,
    record_id: i64,
    status: Option<AttendanceStatus>,
) -> AppResult<Vec<Attendance>> {
    let mut out = Vec::new();

    match status {
        None => {
            let sql = format!(
                "SELECT {COLUMNS} FROM Attendance WHERE record_id = ?1 ORDER BY student_id ASC"
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            for r in stmt.query_map([record_id], map_row)? {
                out.push(r?);
            }
        }
        Some(st) => {
            let sql = format!(
                "SELECT {COLUMNS} FROM Attendance
                 WHERE record_id = ?1 AND status = ?2
                 ORDER BY student_id ASC"
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            for r in stmt.query_map(params![record_id, st.to_db_str()], map_row)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Case-sensitive substring search over the four copied text fields.
pub fn search_in_record(conn: &Connection, record_id: i64, query: &str) -> AppResult<Vec<Attendance>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM Attendance
         WHERE record_id = ?1
           AND (instr(student_id, ?2) > 0
             OR instr(student_fname, ?2) > 0
             OR instr(student_year_level, ?2) > 0
             OR instr(student_course, ?2) > 0)
         ORDER BY student_id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;

    let mut out = Vec::new();
    for r in stmt.query_map(params![record_id, query], map_row)? {
        out.push(r?);
    }
    Ok(out)
}

/// Rows of every record of an event, paired with the record name.
pub fn list_by_event(conn: &Connection, event_id: i64) -> AppResult<Vec<(String, Attendance)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT r.record_name, a.attendance_id, a.record_id, a.student_id, a.student_fname,
                a.student_year_level, a.student_course, a.status, a.timestamp
         FROM Attendance a
         JOIN AttendanceRecords r ON r.record_id = a.record_id
         WHERE r.event_id = ?1
         ORDER BY r.created_at ASC, r.record_id ASC, a.student_id ASC",
    )?;

    let rows = stmt.query_map([event_id], |row| {
        let record_name: String = row.get("record_name")?;
        Ok((record_name, map_row(row)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Plain insert copying the student's current fields.
/// A second row for the same pair fails on `unique_attendance`.
pub fn insert_attendance(
    conn: &Connection,
    record_id: i64,
    student: &Student,
    status: AttendanceStatus,
    timestamp: Option<&NaiveDateTime>,
) -> Result<i64> {
    conn.prepare_cached(
        "INSERT INTO Attendance
            (record_id, student_id, student_fname, student_year_level, student_course, status, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?
    .execute(params![
        record_id,
        student.student_id,
        student.fname,
        student.year_level,
        student.course,
        status.to_db_str(),
        timestamp.map(time::to_db),
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Insert an Absent row unless the pair already has one.
/// Existing rows are left untouched. Returns true when a row was added.
pub fn insert_absent_if_missing(conn: &Connection, record_id: i64, student: &Student) -> Result<bool> {
    let changed = conn
        .prepare_cached(
            "INSERT INTO Attendance
                (record_id, student_id, student_fname, student_year_level, student_course, status, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, 'Absent', NULL)
             ON CONFLICT(record_id, student_id) DO NOTHING",
        )?
        .execute(params![
            record_id,
            student.student_id,
            student.fname,
            student.year_level,
            student.course,
        ])?;
    Ok(changed == 1)
}

/// Set status and timestamp of one row. Returns the rows touched (0 or 1).
pub fn update_status(
    conn: &Connection,
    record_id: i64,
    student_id: &str,
    status: AttendanceStatus,
    timestamp: Option<&NaiveDateTime>,
) -> Result<usize> {
    conn.prepare_cached(
        "UPDATE Attendance SET status = ?1, timestamp = ?2
         WHERE record_id = ?3 AND student_id = ?4",
    )?
    .execute(params![
        status.to_db_str(),
        timestamp.map(time::to_db),
        record_id,
        student_id
    ])
}

/// Set status and timestamp of every row of a record.
pub fn update_status_for_record(
    conn: &Connection,
    record_id: i64,
    status: AttendanceStatus,
    timestamp: Option<&NaiveDateTime>,
) -> Result<usize> {
    conn.prepare_cached("UPDATE Attendance SET status = ?1, timestamp = ?2 WHERE record_id = ?3")?
        .execute(params![status.to_db_str(), timestamp.map(time::to_db), record_id])
}

pub fn count_for_record(conn: &Connection, record_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM Attendance WHERE record_id = ?1",
        [record_id],
        |row| row.get(0),
    )
}
