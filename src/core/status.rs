//! Status transitions on existing attendance rows.

use crate::db::attendance;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::records;
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, AttendanceStatus, BulkStatusRequest, BulkTargets};
use crate::utils::time;

/// What a bulk update did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Rows whose status was written.
    pub updated: usize,
    /// Student ids named in an explicit list that have no row in the record.
    pub skipped: Vec<String>,
}

pub struct StatusLogic;

impl StatusLogic {
    /// Set the status of an existing row. Never creates one.
    ///
    /// Present / Excused stamp the current time, Absent clears it.
    pub fn set_status(
        pool: &mut DbPool,
        record_id: i64,
        student_id: &str,
        status: AttendanceStatus,
    ) -> AppResult<Attendance> {
        let now = time::now();
        let tx = pool.begin()?;

        let changed = attendance::update_status(
            &tx,
            record_id,
            student_id,
            status,
            status.stamp(now).as_ref(),
        )?;
        if changed == 0 {
            return Err(AppError::AttendanceNotFound {
                record_id,
                student_id: student_id.to_string(),
            });
        }

        ttlog(
            &tx,
            "status_set",
            &format!("{record_id}/{student_id}"),
            &format!("Marked {}", status),
        )?;

        let row = attendance::get_attendance(&tx, record_id, student_id)?.ok_or_else(|| {
            AppError::AttendanceNotFound {
                record_id,
                student_id: student_id.to_string(),
            }
        })?;
        tx.commit()?;

        Ok(row)
    }

    /// Apply a bulk status change, all-or-nothing.
    ///
    /// - `All(status)`: every row currently in the record gets `status`.
    /// - `Explicit(list)`: each pair is applied on its own; pairs without a
    ///   row are reported in `skipped` instead of failing the call.
    ///
    /// Any store error rolls the whole batch back.
    pub fn set_status_bulk(pool: &mut DbPool, req: &BulkStatusRequest) -> AppResult<BulkOutcome> {
        let now = time::now();
        let record_id = req.record_id;

        let tx = pool.begin()?;

        if !records::record_exists(&tx, record_id)? {
            return Err(AppError::RecordNotFound(record_id));
        }

        let mut outcome = BulkOutcome::default();

        let summary = match &req.targets {
            BulkTargets::All(status) => {
                outcome.updated = attendance::update_status_for_record(
                    &tx,
                    record_id,
                    *status,
                    status.stamp(now).as_ref(),
                )?;
                format!("All {} entries marked {}", outcome.updated, status)
            }
            BulkTargets::Explicit(updates) => {
                for u in updates {
                    let changed = attendance::update_status(
                        &tx,
                        record_id,
                        &u.student_id,
                        u.status,
                        u.status.stamp(now).as_ref(),
                    )?;
                    if changed == 0 {
                        outcome.skipped.push(u.student_id.clone());
                    } else {
                        outcome.updated += changed;
                    }
                }
                format!(
                    "{} entries updated, {} skipped",
                    outcome.updated,
                    outcome.skipped.len()
                )
            }
        };

        ttlog(&tx, "status_bulk", &record_id.to_string(), &summary)?;
        tx.commit()?;

        Ok(outcome)
    }
}
