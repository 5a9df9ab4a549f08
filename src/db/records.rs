//! AttendanceRecords table.

use crate::db::ts_column;
use crate::errors::AppResult;
use crate::models::AttendanceRecord;
use crate::utils::time;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const COLUMNS: &str = "record_id, record_name, event_id, created_at";

pub fn map_row(row: &Row) -> Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        record_id: row.get("record_id")?,
        record_name: row.get("record_name")?,
        event_id: row.get("event_id")?,
        created_at: ts_column(row, "created_at")?,
    })
}

pub fn get_record(conn: &Connection, record_id: i64) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM AttendanceRecords WHERE record_id = ?1");
    let rec = conn
        .prepare_cached(&sql)?
        .query_row([record_id], map_row)
        .optional()?;
    Ok(rec)
}

pub fn record_exists(conn: &Connection, record_id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM AttendanceRecords WHERE record_id = ?1")?;
    Ok(stmt.exists([record_id])?)
}

fn collect(conn: &Connection, sql: &str, event_id: Option<i64>) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = match event_id {
        Some(id) => stmt.query_map([id], map_row)?,
        None => stmt.query_map([], map_row)?,
    };

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Records of one event, newest first.
pub fn list_records_for_event(conn: &Connection, event_id: i64) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM AttendanceRecords
         WHERE event_id = ?1
         ORDER BY created_at DESC, record_id DESC"
    );
    collect(conn, &sql, Some(event_id))
}

/// Every record of every event, newest first.
pub fn list_records(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM AttendanceRecords ORDER BY created_at DESC, record_id DESC"
    );
    collect(conn, &sql, None)
}

pub fn insert_record(
    conn: &Connection,
    event_id: i64,
    name: &str,
    created_at: &NaiveDateTime,
) -> Result<i64> {
    conn.prepare_cached(
        "INSERT INTO AttendanceRecords (record_name, event_id, created_at) VALUES (?1, ?2, ?3)",
    )?
    .execute(params![name, event_id, time::to_db(created_at)])?;
    Ok(conn.last_insert_rowid())
}

pub fn count_records(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM AttendanceRecords", [], |row| row.get(0))
}
