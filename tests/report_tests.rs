mod common;
use common::{memory_pool, seed_event_record, seed_students};
use rattendance::core::checkin::{CheckInLogic, CheckInSource};
use rattendance::core::events::RecordLogic;
use rattendance::core::report::ReportLogic;
use rattendance::core::roster::RosterLogic;
use rattendance::core::status::StatusLogic;
use rattendance::errors::AppError;
use rattendance::models::AttendanceStatus;

#[test]
fn test_record_summary_counts() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);
    RosterLogic::initialize(&mut pool, record_id).unwrap();
    StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Present).unwrap();
    StatusLogic::set_status(&mut pool, record_id, "S2", AttendanceStatus::Excused).unwrap();

    let s = ReportLogic::record_summary(&mut pool, record_id).unwrap();
    assert_eq!(s.record.record_name, "Morning");
    assert_eq!(s.event.event_name, "Orientation");
    assert_eq!(s.counts.present, 1);
    assert_eq!(s.counts.absent, 1);
    assert_eq!(s.counts.excused, 1);
    assert_eq!(s.counts.total(), 3);
    assert!((s.present_rate() - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_record_summary_missing_record() {
    let mut pool = memory_pool();
    assert!(matches!(
        ReportLogic::record_summary(&mut pool, 1).unwrap_err(),
        AppError::RecordNotFound(1)
    ));
}

#[test]
fn test_event_attendance_spans_records() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (event_id, morning) = seed_event_record(&mut pool);
    let afternoon = RecordLogic::create(&mut pool, event_id, "Afternoon").unwrap();

    RosterLogic::initialize(&mut pool, morning).unwrap();
    CheckInLogic::check_in(&mut pool, afternoon.record_id, "S1", CheckInSource::Manual).unwrap();

    let ev = ReportLogic::event_attendance(&mut pool, event_id).unwrap();
    assert_eq!(ev.rows.len(), 4);
    assert_eq!(ev.counts.present, 1);
    assert_eq!(ev.counts.absent, 3);

    let names: Vec<&str> = ev.rows.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Morning", "Morning", "Morning", "Afternoon"]);
}

#[test]
fn test_event_attendance_missing_event() {
    let mut pool = memory_pool();
    assert!(matches!(
        ReportLogic::event_attendance(&mut pool, 4).unwrap_err(),
        AppError::EventNotFound(4)
    ));
}

#[test]
fn test_overall_summary() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);
    RosterLogic::initialize(&mut pool, record_id).unwrap();
    CheckInLogic::check_in(&mut pool, record_id, "S3", CheckInSource::Qr).unwrap();

    let s = ReportLogic::overall(&mut pool).unwrap();
    assert_eq!(s.totals.students, 3);
    assert_eq!(s.totals.events, 1);
    assert_eq!(s.totals.records, 1);
    assert_eq!(s.counts.present, 1);
    assert_eq!(s.counts.absent, 2);
    assert_eq!(s.counts.excused, 0);
    assert_eq!(s.stamped_today, 1);
}
