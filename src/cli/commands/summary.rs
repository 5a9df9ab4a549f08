use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let s = ReportLogic::overall(&mut pool)?;

    header("Summary");
    println!("Students         : {}", s.totals.students);
    println!("Events           : {}", s.totals.events);
    println!("Records          : {}", s.totals.records);
    println!("Present entries  : {}", s.counts.present);
    println!("Absent entries   : {}", s.counts.absent);
    println!("Excused entries  : {}", s.counts.excused);
    println!("Stamped today    : {}", s.stamped_today);

    Ok(())
}
