use chrono::NaiveDateTime;
use serde::Serialize;

/// One attendance-taking session of an event (`AttendanceRecords` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub record_id: i64,
    pub record_name: String,
    pub event_id: i64,
    pub created_at: NaiveDateTime,
}
