/// ANSI color helper utilities for terminal output.
use crate::models::AttendanceStatus;

pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Green for Present, red for Absent, yellow for Excused.
pub fn color_for_status(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Absent => RED,
        AttendanceStatus::Excused => YELLOW,
    }
}

pub fn colorize_status(status: AttendanceStatus, width: usize) -> String {
    format!(
        "{}{:<width$}{}",
        color_for_status(status),
        status.to_db_str(),
        RESET,
        width = width
    )
}
