//! Student roster management: create / update / delete / search / import.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::students;
use crate::errors::{AppError, AppResult, is_unique_violation};
use crate::models::{Student, StudentInput};
use crate::utils::time;
use std::io;
use std::path::Path;

/// Result of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Rows that became new students.
    pub inserted: usize,
    /// Rows whose id already existed (in the store or earlier in the batch).
    pub duplicates: usize,
    /// Rows with fewer than four columns or a blank field.
    pub malformed: usize,
}

pub struct StudentLogic;

/// Trim every field and reject blanks.
fn normalize(input: &StudentInput) -> AppResult<StudentInput> {
    let s = StudentInput::new(
        input.student_id.trim(),
        input.fname.trim(),
        input.year_level.trim(),
        input.course.trim(),
    );

    if s.student_id.is_empty() || s.fname.is_empty() || s.year_level.is_empty() || s.course.is_empty()
    {
        return Err(AppError::Validation(
            "All fields are required (id, name, year level, course)".into(),
        ));
    }

    Ok(s)
}

impl StudentLogic {
    pub fn create(pool: &mut DbPool, input: &StudentInput) -> AppResult<Student> {
        let s = normalize(input)?;
        let now = time::now();

        let tx = pool.begin()?;

        if students::student_exists(&tx, &s.student_id)? {
            return Err(AppError::DuplicateStudent(s.student_id));
        }

        students::insert_student(&tx, &s, &now).map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateStudent(s.student_id.clone())
            } else {
                AppError::Db(e)
            }
        })?;

        ttlog(&tx, "student_add", &s.student_id, &format!("Added student {}", s.fname))?;
        tx.commit()?;

        Ok(Student {
            student_id: s.student_id,
            fname: s.fname,
            year_level: s.year_level,
            course: s.course,
            created_at: now,
        })
    }

    /// Change name / year / course. Attendance rows already taken keep
    /// the values they were created with.
    pub fn update(pool: &mut DbPool, input: &StudentInput) -> AppResult<Student> {
        let s = normalize(input)?;

        let tx = pool.begin()?;

        if students::update_student(&tx, &s)? == 0 {
            return Err(AppError::StudentNotFound(s.student_id));
        }
        ttlog(&tx, "student_edit", &s.student_id, "Updated student details")?;

        let updated = students::get_student(&tx, &s.student_id)?
            .ok_or_else(|| AppError::StudentNotFound(s.student_id.clone()))?;
        tx.commit()?;

        Ok(updated)
    }

    /// Delete a student and all their attendance rows.
    /// Returns how many attendance rows went with it.
    pub fn delete(pool: &mut DbPool, student_id: &str) -> AppResult<usize> {
        let tx = pool.begin()?;

        let (removed, attendance) = students::delete_student_cascade(&tx, student_id)?;
        if removed == 0 {
            // dropping `tx` rolls back the (empty) attendance delete
            return Err(AppError::StudentNotFound(student_id.to_string()));
        }

        ttlog(
            &tx,
            "student_del",
            student_id,
            &format!("Deleted student and {} attendance entries", attendance),
        )?;
        tx.commit()?;

        Ok(attendance)
    }

    pub fn get(pool: &mut DbPool, student_id: &str) -> AppResult<Student> {
        students::get_student(&pool.conn, student_id)?
            .ok_or_else(|| AppError::StudentNotFound(student_id.to_string()))
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Student>> {
        students::list_students(&pool.conn)
    }

    /// Blank query lists everybody.
    pub fn search(pool: &mut DbPool, query: &str) -> AppResult<Vec<Student>> {
        if query.is_empty() {
            return Self::list(pool);
        }
        students::search_students(&pool.conn, query)
    }

    /// Insert many students in one transaction. Ids that already exist are
    /// skipped, never overwritten; blank rows are counted as malformed.
    pub fn bulk_import(pool: &mut DbPool, rows: &[StudentInput]) -> AppResult<ImportOutcome> {
        let now = time::now();
        let mut outcome = ImportOutcome::default();

        let tx = pool.begin()?;

        for row in rows {
            let s = match normalize(row) {
                Ok(s) => s,
                Err(_) => {
                    outcome.malformed += 1;
                    continue;
                }
            };

            if students::insert_student_if_absent(&tx, &s, &now)? {
                outcome.inserted += 1;
            } else {
                outcome.duplicates += 1;
            }
        }

        ttlog(
            &tx,
            "student_import",
            "",
            &format!(
                "Imported {} students ({} duplicates, {} malformed)",
                outcome.inserted, outcome.duplicates, outcome.malformed
            ),
        )?;
        tx.commit()?;

        Ok(outcome)
    }

    /// Read a CSV file (header row first) and import its first four columns:
    /// id, name, year level, course. Short rows count as malformed.
    pub fn import_csv(pool: &mut DbPool, path: &Path) -> AppResult<ImportOutcome> {
        let (rows, short_rows) = read_students_csv(path)?;
        let mut outcome = Self::bulk_import(pool, &rows)?;
        outcome.malformed += short_rows;
        Ok(outcome)
    }
}

/// Parse a student CSV. Returns the usable rows and the number of rows
/// that had fewer than four columns.
pub fn read_students_csv(path: &Path) -> AppResult<(Vec<StudentInput>, usize)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV open error: {e}"))))?;

    let mut rows = Vec::new();
    let mut short_rows = 0;

    for record in rdr.records() {
        let record =
            record.map_err(|e| AppError::from(io::Error::other(format!("CSV read error: {e}"))))?;

        if record.len() < 4 {
            short_rows += 1;
            continue;
        }

        rows.push(StudentInput::new(&record[0], &record[1], &record[2], &record[3]));
    }

    Ok((rows, short_rows))
}
