mod common;
use common::{init_cli_db, rti, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

/// Init a DB and add two students, one event (id 1) and one record (id 1).
fn prepared(name: &str) -> String {
    let db = setup_test_db(name);
    init_cli_db(&db);

    for (id, fname, year, course) in [("S1", "Ana", "1", "BSCS"), ("S2", "Ben", "2", "BSIT")] {
        rti()
            .args(["--db", &db, "student", "add", id, fname, year, course])
            .assert()
            .success();
    }
    rti()
        .args(["--db", &db, "event", "add", "Orientation", "--date", "2025-03-05"])
        .assert()
        .success()
        .stdout(contains("Event 1 created"));
    rti()
        .args(["--db", &db, "record", "add", "1", "Morning"])
        .assert()
        .success()
        .stdout(contains("Record 1 created"));

    db
}

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("cli_init");
    rti()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));
    assert!(fs::metadata(&db).is_ok());
}

#[test]
fn test_duplicate_student_fails() {
    let db = prepared("cli_dup_student");
    rti()
        .args(["--db", &db, "student", "add", "S1", "Other", "3", "BSEE"])
        .assert()
        .failure()
        .stderr(contains("Student ID already exists: S1"));
}

#[test]
fn test_attendance_init_and_list() {
    let db = prepared("cli_att_init");

    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success()
        .stdout(contains("2 entries created, 0 already present"));

    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success()
        .stdout(contains("0 entries created, 2 already present"));

    rti()
        .args(["--db", &db, "attendance", "list", "1"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("Absent"))
        .stdout(contains("2 entries"));
}

#[test]
fn test_checkin_qr_and_status_filter() {
    let db = prepared("cli_checkin");

    rti()
        .args(["--db", &db, "attendance", "checkin", "1", " S2\n", "--qr"])
        .assert()
        .success()
        .stdout(contains("S2 - Ben"))
        .stdout(contains("checked in"));

    rti()
        .args(["--db", &db, "attendance", "list", "1", "--status", "present"])
        .assert()
        .success()
        .stdout(contains("Ben"))
        .stdout(contains("1 entry"));

    rti()
        .args(["--db", &db, "attendance", "list", "1", "--status", "all"])
        .assert()
        .success()
        .stdout(contains("1 entry"));
}

#[test]
fn test_checkin_unknown_student_fails() {
    let db = prepared("cli_checkin_unknown");
    rti()
        .args(["--db", &db, "attendance", "checkin", "1", "S9"])
        .assert()
        .failure()
        .stderr(contains("Student not found: S9"));
}

#[test]
fn test_set_requires_existing_entry() {
    let db = prepared("cli_set_missing");
    rti()
        .args(["--db", &db, "attendance", "set", "1", "S1", "Present"])
        .assert()
        .failure()
        .stderr(contains("No attendance entry for student S1 in record 1"));
}

#[test]
fn test_set_rejects_unknown_status() {
    let db = prepared("cli_bad_status");
    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success();
    rti()
        .args(["--db", &db, "attendance", "set", "1", "S1", "Late"])
        .assert()
        .failure()
        .stderr(contains("Invalid attendance status: Late"));
}

#[test]
fn test_bulk_set_and_summary() {
    let db = prepared("cli_bulk");
    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success();

    rti()
        .args([
            "--db", &db, "attendance", "bulk", "1", "--set", "S1=Excused", "--set", "S7=Present",
        ])
        .assert()
        .success()
        .stdout(contains("1 entries updated in record 1"))
        .stdout(contains("S7"));

    rti()
        .args(["--db", &db, "attendance", "summary", "1"])
        .assert()
        .success()
        .stdout(contains("Orientation / Morning"))
        .stdout(contains("Excused : 1 of 2 (50.0%)"));
}

#[test]
fn test_bulk_from_json_file() {
    let db = prepared("cli_bulk_json");
    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success();

    let payload = temp_out("cli_bulk_payload", "json");
    fs::write(&payload, r#"{"status": "Present"}"#).unwrap();

    rti()
        .args(["--db", &db, "attendance", "bulk", "1", "--from-json", &payload])
        .assert()
        .success()
        .stdout(contains("2 entries updated"));

    rti()
        .args(["--db", &db, "attendance", "list", "1", "--status", "Absent"])
        .assert()
        .success()
        .stdout(contains("No attendance entries found"));
}

#[test]
fn test_roster_shows_not_marked() {
    let db = prepared("cli_roster");
    rti()
        .args(["--db", &db, "attendance", "checkin", "1", "S1"])
        .assert()
        .success();

    rti()
        .args(["--db", &db, "attendance", "roster", "1"])
        .assert()
        .success()
        .stdout(contains("Present"))
        .stdout(contains("Not Marked"));
}

#[test]
fn test_delete_student_with_yes() {
    let db = prepared("cli_del_student");
    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success();

    rti()
        .args(["--db", &db, "student", "del", "S1", "--yes"])
        .assert()
        .success()
        .stdout(contains("1 attendance entries removed"));

    rti()
        .args(["--db", &db, "student", "list"])
        .assert()
        .success()
        .stdout(contains("1 student(s)"));
}

#[test]
fn test_delete_event_cascades() {
    let db = prepared("cli_del_event");
    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success();

    rti()
        .args(["--db", &db, "event", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("1 records, 2 attendance entries removed"));

    rti()
        .args(["--db", &db, "record", "list"])
        .assert()
        .success()
        .stdout(contains("No attendance records found"));
}

#[test]
fn test_search_student_case_sensitive() {
    let db = prepared("cli_search");
    rti()
        .args(["--db", &db, "student", "search", "BSCS"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("1 student(s)"));
    rti()
        .args(["--db", &db, "student", "search", "bscs"])
        .assert()
        .success()
        .stdout(contains("No students found"));
}

#[test]
fn test_export_record_csv() {
    let db = prepared("cli_export");
    rti()
        .args(["--db", &db, "attendance", "init", "1"])
        .assert()
        .success();

    let out = temp_out("cli_export_record", "csv");
    rti()
        .args(["--db", &db, "export", "record", "1", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Attendance Record Report,Morning"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db = prepared("cli_export_rel");
    rti()
        .args(["--db", &db, "export", "record", "1", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_summary_and_log() {
    let db = prepared("cli_summary");
    rti()
        .args(["--db", &db, "attendance", "checkin", "1", "S1"])
        .assert()
        .success();

    rti()
        .args(["--db", &db, "summary"])
        .assert()
        .success()
        .stdout(contains("Students         : 2"))
        .stdout(contains("Stamped today    : 1"));

    rti()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("student_add"))
        .stdout(contains("checkin"));
}

#[test]
fn test_backup_compressed() {
    let db = prepared("cli_backup");
    let out = temp_out("cli_backup", "sqlite");
    let zip = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    rti()
        .args(["--db", &db, "backup", "--file", &out, "--compress", "--force"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(fs::metadata(&zip).is_ok());
    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_config_print_shows_db_override() {
    let db = setup_test_db("cli_config");
    rti()
        .args(["--db", &db, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("Current configuration"))
        .stdout(contains(db.as_str()))
        .stdout(contains("timestamp_format"));
}
