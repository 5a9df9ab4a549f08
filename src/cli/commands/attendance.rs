use crate::cli::commands::{attendance_table, bad_pair, open_pool, parse_status, parse_status_filter};
use crate::cli::parser::AttendanceCmd;
use crate::config::Config;
use crate::core::checkin::{CheckInLogic, CheckInSource};
use crate::core::query::QueryLogic;
use crate::core::report::ReportLogic;
use crate::core::roster::RosterLogic;
use crate::core::status::StatusLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, BulkStatusRequest, StatusUpdate};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::colorize_status;
use crate::utils::formatting::ratio;
use crate::utils::table::Table;
use crate::utils::time;
use std::fs;

pub fn handle(action: &AttendanceCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let ts_fmt = cfg.timestamp_format.as_str();

    match action {
        AttendanceCmd::Init { record } => {
            let outcome = RosterLogic::initialize(&mut pool, *record)?;
            success(format!(
                "Record {}: {} entries created, {} already present",
                record, outcome.created, outcome.existing
            ));
        }

        AttendanceCmd::Set {
            record,
            student,
            status,
        } => {
            let status = parse_status(status)?;
            let a = StatusLogic::set_status(&mut pool, *record, student, status)?;
            print_change(&a, ts_fmt);
        }

        AttendanceCmd::Bulk {
            record,
            all,
            set,
            from_json,
        } => {
            let req = build_bulk_request(*record, all.as_deref(), set, from_json.as_deref())?;
            let outcome = StatusLogic::set_status_bulk(&mut pool, &req)?;
            success(format!("{} entries updated in record {}", outcome.updated, record));
            if !outcome.skipped.is_empty() {
                warning(format!(
                    "No entry in record {} for: {}",
                    record,
                    outcome.skipped.join(", ")
                ));
            }
        }

        AttendanceCmd::Checkin {
            record,
            identifier,
            qr,
        } => {
            let source = if *qr {
                CheckInSource::Qr
            } else {
                CheckInSource::Manual
            };
            let c = CheckInLogic::check_in(&mut pool, *record, identifier, source)?;
            success(format!(
                "{} checked in at {}",
                c.student.label(),
                time::format_optional(c.attendance.timestamp.as_ref(), ts_fmt)
            ));
            if c.created {
                info("New attendance entry created.");
            }
        }

        AttendanceCmd::Toggle { record, student } => {
            let a = CheckInLogic::toggle(&mut pool, *record, student)?;
            print_change(&a, ts_fmt);
        }

        AttendanceCmd::List { record, status } => {
            let filter = parse_status_filter(status.as_deref())?;
            let rows = QueryLogic::list_by_record(&mut pool, *record, filter)?;
            print_rows(&rows, ts_fmt);
        }

        AttendanceCmd::Search { record, query } => {
            let rows = QueryLogic::search(&mut pool, *record, query)?;
            print_rows(&rows, ts_fmt);
        }

        AttendanceCmd::Roster { record } => {
            let roster = RosterLogic::roster_for_record(&mut pool, *record)?;
            if roster.is_empty() {
                info("No students found.");
                return Ok(());
            }
            let mut table =
                Table::with_headers(&["Student ID", "First Name", "Year Level", "Course", "Status"]);
            for r in &roster {
                table.add_row(vec![
                    r.student_id.clone(),
                    r.student_fname.clone(),
                    r.student_year_level.clone(),
                    r.student_course.clone(),
                    r.status_label().to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        AttendanceCmd::Summary { record } => {
            let s = ReportLogic::record_summary(&mut pool, *record)?;
            let total = s.counts.total();
            println!("{} / {}", s.event.event_name, s.record.record_name);
            println!("Total   : {total}");
            println!("Present : {}", ratio(s.counts.present, total));
            println!("Absent  : {}", ratio(s.counts.absent, total));
            println!("Excused : {}", ratio(s.counts.excused, total));
        }
    }

    Ok(())
}

/// Turn `--all`, `--set` or `--from-json` into one normalized request.
fn build_bulk_request(
    record: i64,
    all: Option<&str>,
    set: &[String],
    from_json: Option<&str>,
) -> AppResult<BulkStatusRequest> {
    if let Some(status) = all {
        return Ok(BulkStatusRequest::all(record, parse_status(status)?));
    }

    if let Some(path) = from_json {
        let content = fs::read_to_string(path)?;
        let mut req: BulkStatusRequest = serde_json::from_str(&content)
            .map_err(|e| AppError::Validation(format!("{path}: {e}")))?;
        // the record on the command line wins over the file
        req.record_id = record;
        return Ok(req);
    }

    if set.is_empty() {
        return Err(AppError::Validation(
            "use --all STATUS, --set ID=STATUS or --from-json FILE".into(),
        ));
    }

    let updates = set
        .iter()
        .map(|pair| {
            let (id, status) = pair.split_once('=').ok_or_else(|| bad_pair(pair))?;
            Ok(StatusUpdate {
                student_id: id.trim().to_string(),
                status: parse_status(status)?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(BulkStatusRequest::explicit(record, updates))
}

fn print_change(a: &Attendance, ts_fmt: &str) {
    let stamp = time::format_optional(a.timestamp.as_ref(), ts_fmt);
    success(format!(
        "{} ({}) is now {}{}",
        a.student_fname,
        a.student_id,
        colorize_status(a.status, 0),
        if stamp.is_empty() {
            String::new()
        } else {
            format!(" at {stamp}")
        }
    ));
}

fn print_rows(rows: &[Attendance], ts_fmt: &str) {
    if rows.is_empty() {
        info("No attendance entries found.");
        return;
    }
    print!("{}", attendance_table(rows, ts_fmt).render());
    println!("{} entr{}", rows.len(), if rows.len() == 1 { "y" } else { "ies" });
}
