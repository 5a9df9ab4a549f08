//! Events table.

use crate::db::{date_column, ts_column};
use crate::errors::AppResult;
use crate::models::Event;
use crate::utils::time;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const COLUMNS: &str = "event_id, event_name, event_date, created_at";

pub fn map_row(row: &Row) -> Result<Event> {
    Ok(Event {
        event_id: row.get("event_id")?,
        event_name: row.get("event_name")?,
        event_date: date_column(row, "event_date")?,
        created_at: ts_column(row, "created_at")?,
    })
}

pub fn get_event(conn: &Connection, event_id: i64) -> AppResult<Option<Event>> {
    let sql = format!("SELECT {COLUMNS} FROM Events WHERE event_id = ?1");
    let ev = conn
        .prepare_cached(&sql)?
        .query_row([event_id], map_row)
        .optional()?;
    Ok(ev)
}

/// Newest first.
pub fn list_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let sql = format!("SELECT {COLUMNS} FROM Events ORDER BY created_at DESC, event_id DESC");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_event(
    conn: &Connection,
    name: &str,
    date: &NaiveDate,
    created_at: &NaiveDateTime,
) -> Result<i64> {
    conn.prepare_cached(
        "INSERT INTO Events (event_name, event_date, created_at) VALUES (?1, ?2, ?3)",
    )?
    .execute(params![
        name,
        date.format("%Y-%m-%d").to_string(),
        time::to_db(created_at)
    ])?;
    Ok(conn.last_insert_rowid())
}

pub fn update_event(conn: &Connection, event_id: i64, name: &str, date: &NaiveDate) -> Result<usize> {
    conn.prepare_cached("UPDATE Events SET event_name = ?1, event_date = ?2 WHERE event_id = ?3")?
        .execute(params![name, date.format("%Y-%m-%d").to_string(), event_id])
}

/// Counts removed by a cascading event delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCascade {
    pub events: usize,
    pub records: usize,
    pub attendance: usize,
}

/// Delete an event, its records and their attendance rows, child-first.
/// Must run inside a transaction.
pub fn delete_event_cascade(conn: &Connection, event_id: i64) -> Result<EventCascade> {
    let attendance = conn.execute(
        "DELETE FROM Attendance
         WHERE record_id IN (SELECT record_id FROM AttendanceRecords WHERE event_id = ?1)",
        [event_id],
    )?;
    let records = conn.execute("DELETE FROM AttendanceRecords WHERE event_id = ?1", [event_id])?;
    let events = conn.execute("DELETE FROM Events WHERE event_id = ?1", [event_id])?;

    Ok(EventCascade {
        events,
        records,
        attendance,
    })
}

pub fn count_events(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM Events", [], |row| row.get(0))
}
