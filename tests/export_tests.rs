mod common;
use common::{memory_pool, seed_event_record, seed_students, temp_out};
use rattendance::core::checkin::{CheckInLogic, CheckInSource};
use rattendance::core::events::RecordLogic;
use rattendance::core::roster::RosterLogic;
use rattendance::core::students::StudentLogic;
use rattendance::db::pool::DbPool;
use rattendance::errors::AppError;
use rattendance::export::{ExportFormat, ExportLogic};
use std::fs;
use std::path::Path;

const TS: &str = "%Y-%m-%d %H:%M:%S";

fn prepared() -> (DbPool, i64, i64) {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (event_id, record_id) = seed_event_record(&mut pool);
    RosterLogic::initialize(&mut pool, record_id).unwrap();
    CheckInLogic::check_in(&mut pool, record_id, "S2", CheckInSource::Manual).unwrap();
    (pool, event_id, record_id)
}

#[test]
fn test_record_csv_has_preamble_and_table() {
    let (mut pool, _, record_id) = prepared();
    let file = temp_out("record_csv", "csv");

    ExportLogic::export_record(&mut pool, record_id, ExportFormat::Csv, &file, false, TS).unwrap();

    let content = fs::read_to_string(&file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Attendance Record Report,Morning");
    assert_eq!(lines[1], "Event,Orientation");
    assert!(lines[2].starts_with("Generated,"));
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Student ID,First Name,Year Level,Course,Status,Timestamp");
    assert_eq!(lines[5], "S1,Ana,1,BSCS,Absent,");
    assert!(lines[6].starts_with("S2,Ben,2,BSIT,Present,20"));
    assert_eq!(lines.len(), 8);
}

#[test]
fn test_event_csv_has_record_column() {
    let (mut pool, event_id, _) = prepared();
    let afternoon = RecordLogic::create(&mut pool, event_id, "Afternoon").unwrap();
    CheckInLogic::check_in(&mut pool, afternoon.record_id, "S1", CheckInSource::Qr).unwrap();
    let file = temp_out("event_csv", "csv");

    ExportLogic::export_event(&mut pool, event_id, ExportFormat::Csv, &file, false, TS).unwrap();

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.starts_with("Event Report,Orientation\nEvent Date,2025-03-05\n"));
    assert!(content.contains("Student ID,First Name,Year Level,Course,Status,Timestamp,Record\n"));
    assert!(content.contains(",Afternoon\n"));
    assert_eq!(content.matches(",Morning\n").count(), 3);
}

#[test]
fn test_record_json_export() {
    let (mut pool, _, record_id) = prepared();
    let file = temp_out("record_json", "json");

    ExportLogic::export_record(&mut pool, record_id, ExportFormat::Json, &file, false, TS).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(v["kind"], "Attendance Record Report");
    assert_eq!(v["title"], "Morning");
    assert_eq!(v["summary"]["present"], 1);
    assert_eq!(v["summary"]["absent"], 2);
    let rows = v["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["student_id"], "S1");
    assert_eq!(rows[0]["timestamp"], "");
    assert!(rows[0].get("record").is_none());
}

#[test]
fn test_record_xlsx_export_writes_workbook() {
    let (mut pool, _, record_id) = prepared();
    let file = temp_out("record_xlsx", "xlsx");

    ExportLogic::export_record(&mut pool, record_id, ExportFormat::Xlsx, &file, false, TS).unwrap();

    let bytes = fs::read(&file).unwrap();
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_relative_output_path_rejected() {
    let (mut pool, _, record_id) = prepared();

    let err = ExportLogic::export_record(&mut pool, record_id, ExportFormat::Csv, "out.csv", true, TS)
        .unwrap_err();
    assert!(matches!(err, AppError::Export(_)));
    assert!(!Path::new("out.csv").exists());
}

#[test]
fn test_export_missing_record() {
    let mut pool = memory_pool();
    let file = temp_out("missing_record", "csv");

    let err = ExportLogic::export_record(&mut pool, 77, ExportFormat::Csv, &file, true, TS).unwrap_err();
    assert!(err.is_not_found());
    assert!(!Path::new(&file).exists());
}

#[test]
fn test_students_csv_can_be_reimported() {
    let (mut pool, _, _) = prepared();
    let file = temp_out("students_roundtrip", "csv");

    ExportLogic::export_students(&mut pool, &file, false).unwrap();

    let mut fresh = memory_pool();
    let outcome = StudentLogic::import_csv(&mut fresh, Path::new(&file)).unwrap();
    assert_eq!(outcome.inserted, 3);
    assert_eq!(StudentLogic::get(&mut fresh, "S2").unwrap().course, "BSIT");
}
