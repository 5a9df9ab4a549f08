use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// An organization event (`Events` table). Owns zero or more attendance records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl Event {
    pub fn date_str(&self) -> String {
        self.event_date.format("%Y-%m-%d").to_string()
    }
}
