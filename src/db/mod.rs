pub mod attendance;
pub mod events;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod records;
pub mod stats;
pub mod students;

use crate::errors::AppError;
use crate::utils::time;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Row;
use rusqlite::types::Type;

/// Read a mandatory timestamp column.
pub(crate) fn ts_column(row: &Row, name: &str) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(name)?;
    time::from_db(&raw).ok_or_else(|| invalid_timestamp(name, &raw))
}

/// Read a nullable timestamp column. Empty text counts as NULL.
pub(crate) fn opt_ts_column(row: &Row, name: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(name)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => time::from_db(s)
            .map(Some)
            .ok_or_else(|| invalid_timestamp(name, s)),
    }
}

pub(crate) fn date_column(row: &Row, name: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(name)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidDate(raw.clone())),
        )
    })
}

fn invalid_timestamp(column: &str, raw: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        Type::Text,
        Box::new(AppError::Validation(format!(
            "invalid timestamp '{raw}' in column {column}"
        ))),
    )
}
