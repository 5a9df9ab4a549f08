//! Check-in: resolve an identifier to a student and mark them Present.
//! Used by both QR scans and manual entry.

use crate::db::attendance;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::records;
use crate::db::students;
use crate::errors::{AppError, AppResult, is_unique_violation};
use crate::models::{Attendance, AttendanceStatus, Student};
use crate::utils::time;

/// Where the identifier came from. Only the audit log tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInSource {
    /// Raw scanner payload. Surrounding whitespace is trimmed before lookup,
    /// unlike manual entry.
    Qr,
    Manual,
}

impl CheckInSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInSource::Qr => "qr",
            CheckInSource::Manual => "manual",
        }
    }
}

/// Confirmation data returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub student: Student,
    pub attendance: Attendance,
    /// True when a new row was inserted, false when an existing one was updated.
    pub created: bool,
}

pub struct CheckInLogic;

impl CheckInLogic {
    /// Mark the student matching `identifier` Present in `record_id`.
    ///
    /// Upserts: an existing row is updated (status + fresh timestamp), a
    /// missing one is created with the student's current details. If an
    /// insert loses a race on `unique_attendance`, it is retried as an update,
    /// and `DuplicateAttendance` is returned when that update finds no row.
    /// Writers hold an IMMEDIATE transaction, so this path is a fallback.
    pub fn check_in(
        pool: &mut DbPool,
        record_id: i64,
        identifier: &str,
        source: CheckInSource,
    ) -> AppResult<CheckIn> {
        let identifier = match source {
            // scanners often append CR/LF to the payload
            CheckInSource::Qr => identifier.trim(),
            CheckInSource::Manual => identifier,
        };
        if identifier.is_empty() {
            return Err(AppError::Validation("Student ID is required".into()));
        }

        let now = time::now();
        let status = AttendanceStatus::Present;
        let stamp = status.stamp(now);

        let tx = pool.begin()?;

        let student = students::get_student(&tx, identifier)?
            .ok_or_else(|| AppError::StudentNotFound(identifier.to_string()))?;

        if !records::record_exists(&tx, record_id)? {
            return Err(AppError::RecordNotFound(record_id));
        }

        let created = match attendance::get_attendance(&tx, record_id, &student.student_id)? {
            Some(_) => {
                attendance::update_status(&tx, record_id, &student.student_id, status, stamp.as_ref())?;
                false
            }
            None => match attendance::insert_attendance(&tx, record_id, &student, status, stamp.as_ref()) {
                Ok(_) => true,
                Err(e) if is_unique_violation(&e) => {
                    let changed = attendance::update_status(
                        &tx,
                        record_id,
                        &student.student_id,
                        status,
                        stamp.as_ref(),
                    )?;
                    if changed == 0 {
                        return Err(AppError::DuplicateAttendance {
                            record_id,
                            student_id: student.student_id.clone(),
                        });
                    }
                    false
                }
                Err(e) => return Err(e.into()),
            },
        };

        ttlog(
            &tx,
            "checkin",
            &format!("{record_id}/{}", student.student_id),
            &format!("Checked in {} via {}", student.fname, source.as_str()),
        )?;

        let row = attendance::get_attendance(&tx, record_id, &student.student_id)?.ok_or_else(|| {
            AppError::AttendanceNotFound {
                record_id,
                student_id: student.student_id.clone(),
            }
        })?;
        tx.commit()?;

        Ok(CheckIn {
            student,
            attendance: row,
            created,
        })
    }

    /// Quick-mark toggle on an existing row: Present → Absent, anything
    /// else → Present, with the usual timestamp rule.
    pub fn toggle(pool: &mut DbPool, record_id: i64, student_id: &str) -> AppResult<Attendance> {
        let now = time::now();
        let tx = pool.begin()?;

        let current = attendance::get_attendance(&tx, record_id, student_id)?.ok_or_else(|| {
            AppError::AttendanceNotFound {
                record_id,
                student_id: student_id.to_string(),
            }
        })?;

        let next = current.status.toggled();
        let stamp = next.stamp(now);
        attendance::update_status(&tx, record_id, student_id, next, stamp.as_ref())?;

        ttlog(
            &tx,
            "status_toggle",
            &format!("{record_id}/{student_id}"),
            &format!("{} → {}", current.status, next),
        )?;
        tx.commit()?;

        Ok(Attendance {
            status: next,
            timestamp: stamp,
            ..current
        })
    }
}
