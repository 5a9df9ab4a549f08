//! Read-only views over the attendance rows of a record.

use crate::db::attendance;
use crate::db::pool::DbPool;
use crate::db::records;
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, AttendanceStatus};

pub struct QueryLogic;

impl QueryLogic {
    /// Rows of a record ordered by student id, optionally one status only.
    pub fn list_by_record(
        pool: &mut DbPool,
        record_id: i64,
        status: Option<AttendanceStatus>,
    ) -> AppResult<Vec<Attendance>> {
        if !records::record_exists(&pool.conn, record_id)? {
            return Err(AppError::RecordNotFound(record_id));
        }
        attendance::list_by_record(&pool.conn, record_id, status)
    }

    /// Rows whose id, name, year level or course contains `query`
    /// (case-sensitive). A blank query returns the whole record.
    pub fn search(pool: &mut DbPool, record_id: i64, query: &str) -> AppResult<Vec<Attendance>> {
        if query.is_empty() {
            return Self::list_by_record(pool, record_id, None);
        }
        if !records::record_exists(&pool.conn, record_id)? {
            return Err(AppError::RecordNotFound(record_id));
        }
        attendance::search_in_record(&pool.conn, record_id, query)
    }
}
