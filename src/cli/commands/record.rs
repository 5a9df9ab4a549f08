use crate::cli::commands::open_pool;
use crate::cli::parser::RecordCmd;
use crate::config::Config;
use crate::core::events::RecordLogic;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::long_date;
use crate::utils::formatting::{bold, ratio};
use crate::utils::table::Table;

pub fn handle(action: &RecordCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        RecordCmd::Add { event_id, name } => {
            let rec = RecordLogic::create(&mut pool, *event_id, name)?;
            success(format!(
                "Record {} created: {} (event {})",
                rec.record_id, rec.record_name, rec.event_id
            ));
        }

        RecordCmd::List { event } => {
            let records = match event {
                Some(id) => RecordLogic::list_for_event(&mut pool, *id)?,
                None => RecordLogic::list_all(&mut pool)?,
            };
            if records.is_empty() {
                info("No attendance records found.");
                return Ok(());
            }
            let mut table = Table::with_headers(&["ID", "Name", "Event", "Created"]);
            for r in &records {
                table.add_row(vec![
                    r.record_id.to_string(),
                    r.record_name.clone(),
                    r.event_id.to_string(),
                    r.created_at.format(&cfg.timestamp_format).to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        RecordCmd::Show { id } => {
            let summary = ReportLogic::record_summary(&mut pool, *id)?;
            let total = summary.counts.total();

            println!("{}", bold(&summary.record.record_name));
            println!(
                "Event   : {} ({})",
                summary.event.event_name,
                long_date(&summary.event.event_date)
            );
            println!(
                "Created : {}",
                summary.record.created_at.format(&cfg.timestamp_format)
            );
            println!("Entries : {total}");
            println!("Present : {}", ratio(summary.counts.present, total));
            println!("Absent  : {}", ratio(summary.counts.absent, total));
            println!("Excused : {}", ratio(summary.counts.excused, total));
        }
    }

    Ok(())
}
