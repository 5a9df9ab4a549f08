//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so that the
//! presentation layer has a single type to turn into messages.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Persistence
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Not found
    // ---------------------------
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("Attendance record not found: {0}")]
    RecordNotFound(i64),

    #[error("No attendance entry for student {student_id} in record {record_id}")]
    AttendanceNotFound { record_id: i64, student_id: String },

    // ---------------------------
    // Conflicts
    // ---------------------------
    #[error("Student ID already exists: {0}")]
    DuplicateStudent(String),

    #[error("Attendance entry already exists for student {student_id} in record {record_id}")]
    DuplicateAttendance { record_id: i64, student_id: String },

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid attendance status: {0} (use Present, Absent or Excused)")]
    InvalidStatus(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

/// Coarse classification of [`AppError`], used by callers that only need
/// to know which family of failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Persistence,
    Other,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::StudentNotFound(_)
            | AppError::EventNotFound(_)
            | AppError::RecordNotFound(_)
            | AppError::AttendanceNotFound { .. } => ErrorKind::NotFound,

            AppError::DuplicateStudent(_) | AppError::DuplicateAttendance { .. } => {
                ErrorKind::Conflict
            }

            AppError::Validation(_) | AppError::InvalidDate(_) | AppError::InvalidStatus(_) => {
                ErrorKind::Validation
            }

            AppError::Db(_) | AppError::Migration(_) => ErrorKind::Persistence,

            _ => ErrorKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// True when a rusqlite error is a UNIQUE / PRIMARY KEY constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

pub type AppResult<T> = Result<T, AppError>;
