use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", ConfigLogic::render(cfg)?);
        }

        if *edit_config {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}, run `rattendance init` first",
                    path.display()
                ));
                return Ok(());
            }
            let requested = ConfigLogic::resolve_editor(editor.as_deref());
            let used = ConfigLogic::edit(&path, &requested)?;
            success(format!("Configuration file edited successfully using '{used}'"));
        }
    }

    Ok(())
}
