//! Timestamp utilities: the storage format of every `*_at` / `timestamp` column.

use chrono::{Local, NaiveDateTime};

/// Storage format (local time, microsecond precision).
pub const DB_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Default human format used by `list` output and exports.
pub const DISPLAY_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Transition instant used for stamping attendance rows.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn to_db(ts: &NaiveDateTime) -> String {
    ts.format(DB_TS_FORMAT).to_string()
}

/// Parse a stored timestamp; the fractional part is optional so rows written
/// by other tools (`YYYY-MM-DD HH:MM:SS`) are accepted too.
pub fn from_db(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

pub fn format_optional(ts: Option<&NaiveDateTime>, fmt: &str) -> String {
    ts.map(|t| t.format(fmt).to_string()).unwrap_or_default()
}
