pub mod attendance;
pub mod backup;
pub mod config;
pub mod event;
pub mod export;
pub mod init;
pub mod log;
pub mod record;
pub mod student;
pub mod summary;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, AttendanceStatus};
use crate::utils::table::Table;
use crate::utils::time;
use std::io::{self, Write};

/// Open the configured database and bring its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Ask a y/N question unless confirmations are off or `--yes` was given.
pub(crate) fn confirm(cfg: &Config, yes: bool, question: &str) -> AppResult<bool> {
    if yes || !cfg.confirm_deletes {
        return Ok(true);
    }

    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    Ok(ans == "y" || ans == "yes")
}

pub(crate) fn parse_status(s: &str) -> AppResult<AttendanceStatus> {
    s.parse()
}

/// `all` (any case) means no filter.
pub(crate) fn parse_status_filter(s: Option<&str>) -> AppResult<Option<AttendanceStatus>> {
    match s {
        None => Ok(None),
        Some(v) if v.trim().eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => parse_status(v).map(Some),
    }
}

pub(crate) fn attendance_table(rows: &[Attendance], ts_format: &str) -> Table {
    let mut table = Table::with_headers(&[
        "Student ID",
        "First Name",
        "Year Level",
        "Course",
        "Status",
        "Timestamp",
    ]);
    for a in rows {
        table.add_row(vec![
            a.student_id.clone(),
            a.student_fname.clone(),
            a.student_year_level.clone(),
            a.student_course.clone(),
            a.status.to_string(),
            time::format_optional(a.timestamp.as_ref(), ts_format),
        ]);
    }
    table
}

/// Error for a required ID=STATUS argument that has no `=`.
pub(crate) fn bad_pair(pair: &str) -> AppError {
    AppError::Validation(format!("expected ID=STATUS, got '{pair}'"))
}
