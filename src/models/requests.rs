//! Normalized inputs built by the transport layer (CLI flags, JSON files)
//! before calling into `core`. The core never looks at how they were sent.

use super::status::AttendanceStatus;
use serde::Deserialize;

/// Fields of a student as entered by a user or read from an import row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentInput {
    pub student_id: String,
    pub fname: String,
    pub year_level: String,
    pub course: String,
}

impl StudentInput {
    pub fn new(student_id: &str, fname: &str, year_level: &str, course: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            fname: fname.to_string(),
            year_level: year_level.to_string(),
            course: course.to_string(),
        }
    }
}

/// Event name plus an optional `YYYY-MM-DD` date (today when omitted on create).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventInput {
    pub name: String,
    pub date: Option<String>,
}

/// One explicit (student, status) pair of a bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusUpdate {
    pub student_id: String,
    pub status: AttendanceStatus,
}

/// Which rows a bulk update touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkTargets {
    /// Every attendance row currently in the record moves to one status.
    All(AttendanceStatus),
    /// Each pair is applied on its own; missing rows are skipped.
    Explicit(Vec<StatusUpdate>),
}

/// A bulk status change for one record.
///
/// Deserializes from either `{"status": "Present"}` (whole record) or
/// `{"updates": [{"student_id": "S1", "status": "Excused"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BulkPayload")]
pub struct BulkStatusRequest {
    pub record_id: i64,
    pub targets: BulkTargets,
}

impl BulkStatusRequest {
    pub fn all(record_id: i64, status: AttendanceStatus) -> Self {
        Self {
            record_id,
            targets: BulkTargets::All(status),
        }
    }

    pub fn explicit(record_id: i64, updates: Vec<StatusUpdate>) -> Self {
        Self {
            record_id,
            targets: BulkTargets::Explicit(updates),
        }
    }
}

#[derive(Deserialize)]
struct BulkPayload {
    #[serde(default)]
    record_id: i64,
    status: Option<AttendanceStatus>,
    updates: Option<Vec<StatusUpdate>>,
}

impl TryFrom<BulkPayload> for BulkStatusRequest {
    type Error = String;

    fn try_from(p: BulkPayload) -> Result<Self, Self::Error> {
        match (p.status, p.updates) {
            (Some(status), None) => Ok(BulkStatusRequest::all(p.record_id, status)),
            (None, Some(updates)) => Ok(BulkStatusRequest::explicit(p.record_id, updates)),
            (Some(_), Some(_)) => Err("use either `status` or `updates`, not both".to_string()),
            (None, None) => Err("`status` or `updates` is required".to_string()),
        }
    }
}
