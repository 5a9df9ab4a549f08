use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `None` or blank → `default`, otherwise the date must be `YYYY-MM-DD`.
pub fn parse_optional_date(input: Option<&str>, default: NaiveDate) -> AppResult<NaiveDate> {
    match input.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

/// Long date used in report titles, e.g. "March 05, 2025".
pub fn long_date(d: &NaiveDate) -> String {
    d.format("%B %d, %Y").to_string()
}
