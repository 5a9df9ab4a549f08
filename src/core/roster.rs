//! Roster reconciliation: make sure every student has a row in a record.

use crate::db::attendance;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::records;
use crate::db::students;
use crate::errors::{AppError, AppResult};
use crate::models::RosterEntry;
use std::collections::HashMap;

/// What `initialize` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOutcome {
    /// Absent rows created for students that had none.
    pub created: usize,
    /// Students that already had a row (left untouched).
    pub existing: usize,
}

pub struct RosterLogic;

impl RosterLogic {
    /// Give every current student an Absent row in `record_id` if they have none.
    ///
    /// Idempotent: existing rows keep their status and timestamp, and a
    /// second call creates nothing. Rows of students that no longer exist
    /// are not touched. Runs in one transaction.
    pub fn initialize(pool: &mut DbPool, record_id: i64) -> AppResult<InitOutcome> {
        let tx = pool.begin()?;

        if !records::record_exists(&tx, record_id)? {
            return Err(AppError::RecordNotFound(record_id));
        }

        let mut outcome = InitOutcome::default();
        for student in students::list_students(&tx)? {
            if attendance::insert_absent_if_missing(&tx, record_id, &student)? {
                outcome.created += 1;
            } else {
                outcome.existing += 1;
            }
        }

        ttlog(
            &tx,
            "record_init",
            &record_id.to_string(),
            &format!(
                "Initialized record: {} created, {} already present",
                outcome.created, outcome.existing
            ),
        )?;
        tx.commit()?;

        Ok(outcome)
    }

    /// Every current student with their status in the record, `None` when
    /// they have no row yet ("Not Marked").
    pub fn roster_for_record(pool: &mut DbPool, record_id: i64) -> AppResult<Vec<RosterEntry>> {
        let conn = &pool.conn;

        if !records::record_exists(conn, record_id)? {
            return Err(AppError::RecordNotFound(record_id));
        }

        let marked: HashMap<String, _> = attendance::list_by_record(conn, record_id, None)?
            .into_iter()
            .map(|a| (a.student_id.clone(), a.status))
            .collect();

        let roster = students::list_students(conn)?
            .into_iter()
            .map(|s| RosterEntry {
                status: marked.get(&s.student_id).copied(),
                student_id: s.student_id,
                student_fname: s.fname,
                student_year_level: s.year_level,
                student_course: s.course,
            })
            .collect();

        Ok(roster)
    }
}
