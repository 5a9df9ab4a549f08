// src/export/model.rs

use crate::db::stats::StatusCounts;
use crate::models::Attendance;
use crate::utils::time;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Flat attendance row shared by CSV / JSON / XLSX.
#[derive(Serialize, Clone, Debug)]
pub struct ReportRow {
    pub student_id: String,
    pub first_name: String,
    pub year_level: String,
    pub course: String,
    pub status: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    #[serde(skip)]
    pub stamped: Option<NaiveDateTime>,
}

impl ReportRow {
    pub fn from_attendance(a: &Attendance, record: Option<String>, ts_format: &str) -> Self {
        Self {
            student_id: a.student_id.clone(),
            first_name: a.student_fname.clone(),
            year_level: a.student_year_level.clone(),
            course: a.student_course.clone(),
            status: a.status.to_string(),
            timestamp: time::format_optional(a.timestamp.as_ref(), ts_format),
            record,
            stamped: a.timestamp,
        }
    }

    pub(crate) fn cells(&self, with_record: bool) -> Vec<String> {
        let mut out = vec![
            self.student_id.clone(),
            self.first_name.clone(),
            self.year_level.clone(),
            self.course.clone(),
            self.status.clone(),
            self.timestamp.clone(),
        ];
        if with_record {
            out.push(self.record.clone().unwrap_or_default());
        }
        out
    }
}

/// A record or event report ready to be written in any format.
#[derive(Serialize, Clone, Debug)]
pub struct Report {
    /// "Attendance Record Report" or "Event Report".
    pub kind: &'static str,
    pub title: String,
    /// Extra preamble pairs, e.g. ("Event", "Orientation").
    pub meta: Vec<(String, String)>,
    pub generated: String,
    pub summary: StatusCounts,
    pub rows: Vec<ReportRow>,
    /// Event reports carry a "Record" column.
    #[serde(skip)]
    pub with_record: bool,
}

pub const RECORD_REPORT: &str = "Attendance Record Report";
pub const EVENT_REPORT: &str = "Event Report";

impl Report {
    pub(crate) fn headers(&self) -> Vec<&'static str> {
        let mut h = vec![
            "Student ID",
            "First Name",
            "Year Level",
            "Course",
            "Status",
            "Timestamp",
        ];
        if self.with_record {
            h.push("Record");
        }
        h
    }

    /// Short label used in file name suggestions and messages.
    pub fn subject(&self) -> String {
        format!("{} - {}", self.kind, self.title)
    }
}
