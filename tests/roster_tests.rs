mod common;
use common::{add_student, memory_pool, seed_event_record, seed_students};
use rattendance::core::roster::{InitOutcome, RosterLogic};
use rattendance::core::status::StatusLogic;
use rattendance::core::students::StudentLogic;
use rattendance::db::attendance;
use rattendance::errors::AppError;
use rattendance::models::AttendanceStatus;

#[test]
fn test_initialize_creates_absent_rows_for_every_student() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);

    let outcome = RosterLogic::initialize(&mut pool, record_id).unwrap();
    assert_eq!(
        outcome,
        InitOutcome {
            created: 3,
            existing: 0
        }
    );

    let rows = attendance::list_by_record(&pool.conn, record_id, None).unwrap();
    assert_eq!(rows.len(), 3);
    for r in &rows {
        assert_eq!(r.status, AttendanceStatus::Absent);
        assert!(r.timestamp.is_none());
    }
}

#[test]
fn test_initialize_is_idempotent_and_keeps_marks() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);

    RosterLogic::initialize(&mut pool, record_id).unwrap();
    let marked = StatusLogic::set_status(&mut pool, record_id, "S1", AttendanceStatus::Present)
        .unwrap();

    let again = RosterLogic::initialize(&mut pool, record_id).unwrap();
    assert_eq!(again.created, 0);
    assert_eq!(again.existing, 3);

    let row = attendance::get_attendance(&pool.conn, record_id, "S1")
        .unwrap()
        .unwrap();
    assert_eq!(row.status, AttendanceStatus::Present);
    assert_eq!(row.timestamp, marked.timestamp);
    assert_eq!(attendance::count_for_record(&pool.conn, record_id).unwrap(), 3);
}

#[test]
fn test_initialize_picks_up_new_students_only() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);
    RosterLogic::initialize(&mut pool, record_id).unwrap();

    add_student(&mut pool, "S4", "Dan", "4", "BSEE");
    let outcome = RosterLogic::initialize(&mut pool, record_id).unwrap();

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.existing, 3);
    let row = attendance::get_attendance(&pool.conn, record_id, "S4")
        .unwrap()
        .unwrap();
    assert_eq!(row.student_fname, "Dan");
    assert_eq!(row.student_course, "BSEE");
}

#[test]
fn test_initialize_with_no_students_creates_nothing() {
    let mut pool = memory_pool();
    let (_, record_id) = seed_event_record(&mut pool);

    let outcome = RosterLogic::initialize(&mut pool, record_id).unwrap();
    assert_eq!(outcome, InitOutcome::default());
}

#[test]
fn test_initialize_missing_record() {
    let mut pool = memory_pool();
    seed_students(&mut pool);

    let err = RosterLogic::initialize(&mut pool, 99).unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound(99)));
    assert_eq!(attendance::count_for_record(&pool.conn, 99).unwrap(), 0);
}

#[test]
fn test_roster_marks_students_without_rows() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);
    RosterLogic::initialize(&mut pool, record_id).unwrap();
    StatusLogic::set_status(&mut pool, record_id, "S3", AttendanceStatus::Excused).unwrap();
    add_student(&mut pool, "S4", "Dan", "4", "BSEE");

    let roster = RosterLogic::roster_for_record(&mut pool, record_id).unwrap();
    let labels: Vec<(&str, &str)> = roster
        .iter()
        .map(|r| (r.student_id.as_str(), r.status_label()))
        .collect();

    assert_eq!(
        labels,
        vec![
            ("S1", "Absent"),
            ("S2", "Absent"),
            ("S3", "Excused"),
            ("S4", "Not Marked"),
        ]
    );
}

#[test]
fn test_roster_uses_current_student_details() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);
    RosterLogic::initialize(&mut pool, record_id).unwrap();

    StudentLogic::update(
        &mut pool,
        &rattendance::models::StudentInput::new("S2", "Benedict", "3", "BSIT"),
    )
    .unwrap();

    let roster = RosterLogic::roster_for_record(&mut pool, record_id).unwrap();
    let ben = roster.iter().find(|r| r.student_id == "S2").unwrap();
    assert_eq!(ben.student_fname, "Benedict");
    assert_eq!(ben.status, Some(AttendanceStatus::Absent));
}

#[test]
fn test_initialize_failure_leaves_record_untouched() {
    let mut pool = memory_pool();
    seed_students(&mut pool);
    let (_, record_id) = seed_event_record(&mut pool);

    // S1 is inserted before S2 fails
    pool.conn
        .execute_batch(
            "CREATE TRIGGER block_s2 BEFORE INSERT ON Attendance
             WHEN NEW.student_id = 'S2'
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .unwrap();

    let err = RosterLogic::initialize(&mut pool, record_id).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(attendance::count_for_record(&pool.conn, record_id).unwrap(), 0);

    let ops: Vec<String> = rattendance::db::log::load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert!(!ops.contains(&"record_init".to_string()));
}
