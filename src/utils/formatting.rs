//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// "3 of 10 (30.0%)"
pub fn ratio(part: usize, total: usize) -> String {
    if total == 0 {
        return format!("{part} of 0");
    }
    let pct = part as f64 * 100.0 / total as f64;
    format!("{part} of {total} ({pct:.1}%)")
}
