use super::status::AttendanceStatus;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One attendance row for a (record, student) pair (`Attendance` table).
///
/// The `student_*` fields are copies taken when the row was created and are
/// never refreshed from `Students` afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendance {
    pub attendance_id: i64,
    pub record_id: i64,
    pub student_id: String,
    pub student_fname: String,
    pub student_year_level: String,
    pub student_course: String,
    pub status: AttendanceStatus,
    pub timestamp: Option<NaiveDateTime>,
}

/// A current student together with their status in a record, if marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub student_fname: String,
    pub student_year_level: String,
    pub student_course: String,
    pub status: Option<AttendanceStatus>,
}

impl RosterEntry {
    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.to_db_str()).unwrap_or("Not Marked")
    }
}
