use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Attendance status of one student for one record.
///
/// The textual values (`Present`, `Absent`, `Excused`) are stored verbatim
/// in `Attendance.status` and read by external report tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttendanceStatus {
    Present,
    #[default]
    Absent,
    Excused,
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Excused => "Excused",
        }
    }

    /// Convert DB string → enum (exact match only)
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Present" => Some(AttendanceStatus::Present),
            "Absent" => Some(AttendanceStatus::Absent),
            "Excused" => Some(AttendanceStatus::Excused),
            _ => None,
        }
    }

    /// Helper: convert user input (any case, or the one-letter code P/A/E)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "present" | "p" => Some(AttendanceStatus::Present),
            "absent" | "a" => Some(AttendanceStatus::Absent),
            "excused" | "e" => Some(AttendanceStatus::Excused),
            _ => None,
        }
    }

    /// Timestamp that goes with this status when a transition happens at `now`.
    ///
    /// Present and Excused are stamped, Absent clears the stamp.
    pub fn stamp(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            AttendanceStatus::Present | AttendanceStatus::Excused => Some(now),
            AttendanceStatus::Absent => None,
        }
    }

    /// Quick-mark toggle: only Present goes back to Absent.
    pub fn toggled(&self) -> Self {
        match self {
            AttendanceStatus::Present => AttendanceStatus::Absent,
            AttendanceStatus::Absent | AttendanceStatus::Excused => AttendanceStatus::Present,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
    }
}
