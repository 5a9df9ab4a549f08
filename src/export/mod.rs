// src/export/mod.rs

mod csv_report;
mod excel_date;
mod fs_utils;
mod json_report;
pub mod logic;
mod model;
mod xlsx;

pub(crate) use fs_utils::ensure_writable;
pub use logic::ExportLogic;
pub use model::{Report, ReportRow};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}
