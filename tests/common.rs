#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rattendance::core::events::{EventLogic, RecordLogic};
use rattendance::core::students::StudentLogic;
use rattendance::db::initialize::init_db;
use rattendance::db::pool::DbPool;
use rattendance::models::{EventInput, StudentInput};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB file through the CLI (test mode, no config written)
pub fn init_cli_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh in-memory database with the full schema.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::open_in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn add_student(pool: &mut DbPool, id: &str, name: &str, year: &str, course: &str) {
    StudentLogic::create(pool, &StudentInput::new(id, name, year, course)).expect("add student");
}

/// Three students: S1 Ana, S2 Ben, S3 Cara.
pub fn seed_students(pool: &mut DbPool) {
    add_student(pool, "S1", "Ana", "1", "BSCS");
    add_student(pool, "S2", "Ben", "2", "BSIT");
    add_student(pool, "S3", "Cara", "3", "BSCS");
}

/// One event with one record; returns (event_id, record_id).
pub fn seed_event_record(pool: &mut DbPool) -> (i64, i64) {
    let ev = EventLogic::create(
        pool,
        &EventInput {
            name: "Orientation".into(),
            date: Some("2025-03-05".into()),
        },
    )
    .expect("add event");
    let rec = RecordLogic::create(pool, ev.event_id, "Morning").expect("add record");
    (ev.event_id, rec.record_id)
}
