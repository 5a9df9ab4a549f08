use crate::cli::commands::open_pool;
use crate::cli::parser::ExportTarget;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(target: &ExportTarget, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match target {
        ExportTarget::Record {
            id,
            format,
            file,
            force,
        } => {
            ExportLogic::export_record(&mut pool, *id, *format, file, *force, &cfg.timestamp_format)?;
        }
        ExportTarget::Event {
            id,
            format,
            file,
            force,
        } => {
            ExportLogic::export_event(&mut pool, *id, *format, file, *force, &cfg.timestamp_format)?;
        }
    }

    Ok(())
}
