use crate::cli::commands::{confirm, open_pool};
use crate::cli::parser::EventCmd;
use crate::config::Config;
use crate::core::events::EventLogic;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::models::EventInput;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::{bold, ratio};
use crate::utils::table::Table;
use crate::utils::time;

pub fn handle(action: &EventCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        EventCmd::Add { name, date } => {
            let ev = EventLogic::create(
                &mut pool,
                &EventInput {
                    name: name.clone(),
                    date: date.clone(),
                },
            )?;
            success(format!(
                "Event {} created: {} ({})",
                ev.event_id,
                ev.event_name,
                ev.date_str()
            ));
        }

        EventCmd::Edit { id, name, date } => {
            let current = EventLogic::get(&mut pool, *id)?;
            let ev = EventLogic::update(
                &mut pool,
                *id,
                &EventInput {
                    name: name.clone().unwrap_or(current.event_name),
                    date: date.clone(),
                },
            )?;
            success(format!(
                "Event {} updated: {} ({})",
                ev.event_id,
                ev.event_name,
                ev.date_str()
            ));
        }

        EventCmd::Del { id, yes } => {
            let ev = EventLogic::get(&mut pool, *id)?;
            if !confirm(
                cfg,
                *yes,
                &format!(
                    "Delete event '{}' with all its records and attendance?",
                    ev.event_name
                ),
            )? {
                warning("Deletion cancelled.");
                return Ok(());
            }
            let removed = EventLogic::delete(&mut pool, *id)?;
            success(format!(
                "Event {} deleted ({} records, {} attendance entries removed)",
                id, removed.records, removed.attendance
            ));
        }

        EventCmd::List => {
            let events = EventLogic::list(&mut pool)?;
            if events.is_empty() {
                info("No events found.");
                return Ok(());
            }
            let mut table = Table::with_headers(&["ID", "Name", "Date", "Created"]);
            for ev in &events {
                table.add_row(vec![
                    ev.event_id.to_string(),
                    ev.event_name.clone(),
                    ev.date_str(),
                    ev.created_at.format(&cfg.timestamp_format).to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        EventCmd::Show { id } => {
            let ev = ReportLogic::event_attendance(&mut pool, *id)?;
            println!(
                "{} ({})\n",
                bold(&ev.event.event_name),
                ev.event.date_str()
            );
            if ev.rows.is_empty() {
                info("No attendance entries for this event.");
                return Ok(());
            }

            let mut table = Table::with_headers(&[
                "Record",
                "Student ID",
                "First Name",
                "Status",
                "Timestamp",
            ]);
            for (record_name, a) in &ev.rows {
                table.add_row(vec![
                    record_name.clone(),
                    a.student_id.clone(),
                    a.student_fname.clone(),
                    a.status.to_string(),
                    time::format_optional(a.timestamp.as_ref(), &cfg.timestamp_format),
                ]);
            }
            print!("{}", table.render());
            let total = ev.counts.total();
            println!(
                "\nPresent: {}  Absent: {}  Excused: {}",
                ratio(ev.counts.present, total),
                ratio(ev.counts.absent, total),
                ratio(ev.counts.excused, total)
            );
        }
    }

    Ok(())
}
