//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// One decimal, as shown everywhere a percentage is printed.
pub fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Fixed-width bar for a value in [0, 100].
pub fn progress_bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
