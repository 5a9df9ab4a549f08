//! rAttendance library root.
//! Exposes the CLI parser, the high-level `run()` function and the core
//! modules (students, events, records, roster, status, check-in, queries).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Student { action } => cli::commands::student::handle(action, cfg),
        Commands::Event { action } => cli::commands::event::handle(action, cfg),
        Commands::Record { action } => cli::commands::record::handle(action, cfg),
        Commands::Attendance { action } => cli::commands::attendance::handle(action, cfg),
        Commands::Export { target } => cli::commands::export::handle(target, cfg),
        Commands::Summary => cli::commands::summary::handle(cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the config, so a broken existing one must not block it
    let mut cfg = match (&cli.command, Config::load()) {
        (_, Ok(cfg)) => cfg,
        (Commands::Init, Err(_)) => Config::default(),
        (_, Err(e)) => return Err(e),
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
