mod common;
use common::{memory_pool, seed_event_record, seed_students};
use rattendance::core::roster::RosterLogic;
use rattendance::core::status::StatusLogic;
use rattendance::db::attendance;
use rattendance::db::pool::DbPool;
use rattendance::errors::AppError;
use rattendance::models::{AttendanceStatus, BulkStatusRequest, BulkTargets, StatusUpdate};

fn initialized() -> (DbPool, i64) {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);
    RosterLogic::initialize(&mut pool, record_id).unwrap();
    (pool, record_id)
}

#[test]
fn test_present_and_excused_are_stamped() {
    let (mut pool, record_id) = initialized();

    let a = StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Present).unwrap();
    assert_eq!(a.status, AttendanceStatus::Present);
    assert!(a.timestamp.is_some());

    let b = StatusLogic::set_status(&mut pool, record_id, "S2", AttendanceStatus::Excused).unwrap();
    assert_eq!(b.status, AttendanceStatus::Excused);
    assert!(b.timestamp.is_some());
}

#[test]
fn test_absent_clears_timestamp() {
    let (mut pool, record_id) = initialized();

    StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Present).unwrap();
    let a = StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Absent).unwrap();

    assert_eq!(a.status, AttendanceStatus::Absent);
    assert!(a.timestamp.is_none());

    let stored = attendance::get_attendance(&pool.conn, record_id, "S1")
        .unwrap()
        .unwrap();
    assert!(stored.timestamp.is_none());
}

#[test]
fn test_restamp_on_repeated_present() {
    let (mut pool, record_id) = initialized();

    let first = StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Present)
        .unwrap()
        .timestamp
        .unwrap();
    let second = StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Present)
        .unwrap()
        .timestamp
        .unwrap();
    assert!(second >= first);
}

#[test]
fn test_set_status_never_creates_rows() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);

    let err = StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Present)
        .unwrap_err();
    assert!(matches!(err, AppError::AttendanceNotFound { .. }));
    assert_eq!(attendance::count_for_record(&pool.conn, record_id).unwrap(), 0);
}

#[test]
fn test_bulk_all_updates_every_row() {
    let (mut pool, record_id) = initialized();

    let outcome =
        StatusLogic::set_status_bulk(&mut pool, &BulkStatusRequest::all(record_id, AttendanceStatus::Present))
            .unwrap();
    assert_eq!(outcome.updated, 3);
    assert!(outcome.skipped.is_empty());

    let rows = attendance::list_by_record(&pool.conn, record_id, Some(AttendanceStatus::Present)).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.timestamp.is_some()));
}

#[test]
fn test_bulk_all_absent_clears_stamps() {
    let (mut pool, record_id) = initialized();
    StatusLogic::set_status_bulk(&mut pool, &BulkStatusRequest::all(record_id, AttendanceStatus::Present))
        .unwrap();

    StatusLogic::set_status_bulk(&mut pool, &BulkStatusRequest::all(record_id, AttendanceStatus::Absent))
        .unwrap();

    let rows = attendance::list_by_record(&pool.conn, record_id, None).unwrap();
    assert!(rows.iter().all(|r| r.status == AttendanceStatus::Absent && r.timestamp.is_none()));
}

#[test]
fn test_bulk_explicit_skips_missing_rows() {
    let (mut pool, record_id) = initialized();

    let req = BulkStatusRequest::explicit(
        record_id,
        vec![
            StatusUpdate {
                student_id: "S1".into(),
                status: AttendanceStatus::Present,
            },
            StatusUpdate {
                student_id: "GHOST".into(),
                status: AttendanceStatus::Present,
            },
            StatusUpdate {
                student_id: "S3".into(),
                status: AttendanceStatus::Excused,
            },
        ],
    );
    let outcome = StatusLogic::set_status_bulk(&mut pool, &req).unwrap();

    assert_eq!(outcome.updated, 2);
    assert_eq!(outcome.skipped, vec!["GHOST".to_string()]);
    assert_eq!(attendance::count_for_record(&pool.conn, record_id).unwrap(), 3);

    let s2 = attendance::get_attendance(&pool.conn, record_id, "S2").unwrap().unwrap();
    assert_eq!(s2.status, AttendanceStatus::Absent);
    let s3 = attendance::get_attendance(&pool.conn, record_id, "S3").unwrap().unwrap();
    assert_eq!(s3.status, AttendanceStatus::Excused);
}

#[test]
fn test_bulk_missing_record() {
    let mut pool = memory_pool();
    let err = StatusLogic::set_status_bulk(&mut pool, &BulkStatusRequest::all(7, AttendanceStatus::Present))
        .unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound(7)));
}

#[test]
fn test_bulk_payload_shapes() {
    let all: BulkStatusRequest = serde_json::from_str(r#"{"status": "Present"}"#).unwrap();
    assert_eq!(all.targets, BulkTargets::All(AttendanceStatus::Present));

    let explicit: BulkStatusRequest = serde_json::from_str(
        r#"{"record_id": 3, "updates": [{"student_id": "S1", "status": "Excused"}]}"#,
    )
    .unwrap();
    assert_eq!(explicit.record_id, 3);
    assert_eq!(
        explicit.targets,
        BulkTargets::Explicit(vec![StatusUpdate {
            student_id: "S1".into(),
            status: AttendanceStatus::Excused,
        }])
    );

    assert!(serde_json::from_str::<BulkStatusRequest>(r#"{}"#).is_err());
    assert!(
        serde_json::from_str::<BulkStatusRequest>(r#"{"status": "Present", "updates": []}"#)
            .is_err()
    );
    assert!(serde_json::from_str::<BulkStatusRequest>(r#"{"status": "Late"}"#).is_err());
}

#[test]
fn test_status_parsing_and_toggle_rule() {
    assert_eq!("present".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Present);
    assert_eq!("E".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Excused);
    assert!(matches!(
        "late".parse::<AttendanceStatus>(),
        Err(AppError::InvalidStatus(_))
    ));

    assert_eq!(AttendanceStatus::Present.toggled(), AttendanceStatus::Absent);
    assert_eq!(AttendanceStatus::Absent.toggled(), AttendanceStatus::Present);
    assert_eq!(AttendanceStatus::Excused.toggled(), AttendanceStatus::Present);
}

#[test]
fn test_bulk_explicit_failure_applies_nothing() {
    let (mut pool, record_id) = initialized();
    pool.conn
        .execute_batch(
            "CREATE TRIGGER block_s3 BEFORE UPDATE ON Attendance
             WHEN NEW.student_id = 'S3'
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .unwrap();

    let req = BulkStatusRequest::explicit(
        record_id,
        vec![
            StatusUpdate {
                student_id: "S1".into(),
                status: AttendanceStatus::Present,
            },
            StatusUpdate {
                student_id: "S2".into(),
                status: AttendanceStatus::Excused,
            },
            StatusUpdate {
                student_id: "S3".into(),
                status: AttendanceStatus::Present,
            },
        ],
    );
    let err = StatusLogic::set_status_bulk(&mut pool, &req).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));

    let rows = attendance::list_by_record(&pool.conn, record_id, None).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.status == AttendanceStatus::Absent && r.timestamp.is_none()));
}
