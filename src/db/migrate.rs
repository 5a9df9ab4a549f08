use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also stores which migrations ran.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// The four entity tables. Names and columns are the external contract
/// read by report tools, keep them verbatim.
const CREATE_CORE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS Students (
        student_id  TEXT PRIMARY KEY NOT NULL,
        fname       TEXT NOT NULL,
        year_level  TEXT NOT NULL,
        course      TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS Events (
        event_id    INTEGER PRIMARY KEY AUTOINCREMENT,
        event_name  TEXT NOT NULL,
        event_date  TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS AttendanceRecords (
        record_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        record_name TEXT NOT NULL,
        event_id    INTEGER NOT NULL REFERENCES Events(event_id) ON DELETE CASCADE,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS Attendance (
        attendance_id      INTEGER PRIMARY KEY AUTOINCREMENT,
        record_id          INTEGER NOT NULL REFERENCES AttendanceRecords(record_id) ON DELETE CASCADE,
        student_id         TEXT NOT NULL REFERENCES Students(student_id) ON DELETE CASCADE,
        student_fname      TEXT NOT NULL,
        student_year_level TEXT NOT NULL,
        student_course     TEXT NOT NULL,
        status             TEXT NOT NULL DEFAULT 'Absent'
                           CHECK (status IN ('Present','Absent','Excused')),
        timestamp          TEXT,
        CONSTRAINT unique_attendance UNIQUE (record_id, student_id)
    );
"#;

const CREATE_INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_records_event ON AttendanceRecords(event_id);
    CREATE INDEX IF NOT EXISTS idx_attendance_student ON Attendance(student_id);
    CREATE INDEX IF NOT EXISTS idx_attendance_record_status ON Attendance(record_id, status);
"#;

/// (version, sql, description) in application order.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250301_0001_core_tables",
        CREATE_CORE_TABLES,
        "Created Students, Events, AttendanceRecords and Attendance tables",
    ),
    (
        "20250301_0002_lookup_indexes",
        CREATE_INDEXES,
        "Added lookup indexes on AttendanceRecords and Attendance",
    ),
];

/// Public entry point: run all pending migrations.
///
/// Called by db::init_db(). Each migration runs in its own transaction
/// together with its `migration_applied` marker.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, sql, description) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;
        mark_applied(&tx, version, description)?;
        tx.commit()?;

        success(format!("Migration applied: {} → {}", version, description));
    }

    Ok(())
}
