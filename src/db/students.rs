//! Students table: CRUD, lookups and text search.

use crate::db::ts_column;
use crate::errors::AppResult;
use crate::models::{Student, StudentInput};
use crate::utils::time;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const COLUMNS: &str = "student_id, fname, year_level, course, created_at";

pub fn map_row(row: &Row) -> Result<Student> {
    Ok(Student {
        student_id: row.get("student_id")?,
        fname: row.get("fname")?,
        year_level: row.get("year_level")?,
        course: row.get("course")?,
        created_at: ts_column(row, "created_at")?,
    })
}

pub fn get_student(conn: &Connection, student_id: &str) -> AppResult<Option<Student>> {
    let sql = format!("SELECT {COLUMNS} FROM Students WHERE student_id = ?1");
    let student = conn
        .prepare_cached(&sql)?
        .query_row([student_id], map_row)
        .optional()?;
    Ok(student)
}

pub fn student_exists(conn: &Connection, student_id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM Students WHERE student_id = ?1")?;
    Ok(stmt.exists([student_id])?)
}

/// All students ordered by identifier.
pub fn list_students(conn: &Connection) -> AppResult<Vec<Student>> {
    let sql = format!("SELECT {COLUMNS} FROM Students ORDER BY student_id ASC");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Case-sensitive substring match on any of the four text fields.
///
/// `instr()` is used instead of LIKE because LIKE folds ASCII case.
pub fn search_students(conn: &Connection, query: &str) -> AppResult<Vec<Student>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM Students
         WHERE instr(student_id, ?1) > 0
            OR instr(fname, ?1) > 0
            OR instr(year_level, ?1) > 0
            OR instr(course, ?1) > 0
         ORDER BY student_id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([query], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Plain insert; a duplicate id surfaces as a UNIQUE violation.
pub fn insert_student(conn: &Connection, s: &StudentInput, created_at: &NaiveDateTime) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO Students (student_id, fname, year_level, course, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?
    .execute(params![
        s.student_id,
        s.fname,
        s.year_level,
        s.course,
        time::to_db(created_at)
    ])?;
    Ok(())
}

/// Insert unless the id is already taken. Returns true when a row was added.
pub fn insert_student_if_absent(
    conn: &Connection,
    s: &StudentInput,
    created_at: &NaiveDateTime,
) -> Result<bool> {
    let changed = conn
        .prepare_cached(
            "INSERT INTO Students (student_id, fname, year_level, course, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(student_id) DO NOTHING",
        )?
        .execute(params![
            s.student_id,
            s.fname,
            s.year_level,
            s.course,
            time::to_db(created_at)
        ])?;
    Ok(changed == 1)
}

/// Update the mutable fields. Returns the number of rows touched (0 or 1).
pub fn update_student(conn: &Connection, s: &StudentInput) -> Result<usize> {
    conn.prepare_cached(
        "UPDATE Students SET fname = ?1, year_level = ?2, course = ?3
         WHERE student_id = ?4",
    )?
    .execute(params![s.fname, s.year_level, s.course, s.student_id])
}

/// Delete a student and every attendance row pointing at it.
/// Must run inside a transaction; dependents go first.
pub fn delete_student_cascade(conn: &Connection, student_id: &str) -> Result<(usize, usize)> {
    let attendance = conn.execute("DELETE FROM Attendance WHERE student_id = ?1", [student_id])?;
    let students = conn.execute("DELETE FROM Students WHERE student_id = ?1", [student_id])?;
    Ok((students, attendance))
}

pub fn count_students(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM Students", [], |row| row.get(0))
}
