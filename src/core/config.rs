use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Effective configuration as YAML, including defaults for fields
    /// missing from the file.
    pub fn render(cfg: &Config) -> AppResult<String> {
        cfg.to_yaml()
    }

    /// Editor resolution order: `--editor`, `$EDITOR`, `$VISUAL`, platform default.
    pub fn resolve_editor(requested: Option<&str>) -> String {
        if let Some(ed) = requested {
            return ed.to_string();
        }
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| Self::default_editor().to_string())
    }

    pub fn default_editor() -> &'static str {
        if cfg!(target_os = "windows") {
            "notepad"
        } else {
            "nano"
        }
    }

    /// Open `path` in `editor`, falling back to the platform default once.
    /// Returns the editor that succeeded.
    pub fn edit(path: &Path, editor: &str) -> AppResult<String> {
        if Self::run_editor(editor, path) {
            return Ok(editor.to_string());
        }

        let fallback = Self::default_editor();
        if fallback != editor && Self::run_editor(fallback, path) {
            return Ok(fallback.to_string());
        }

        Err(AppError::Config(format!(
            "could not open {} with '{}' or '{}'",
            path.display(),
            editor,
            fallback
        )))
    }

    fn run_editor(editor: &str, path: &Path) -> bool {
        matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
    }
}
