use std::fmt;

// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Offline notice for a write that went to the local queue.
pub fn saved_locally<T: fmt::Display>(what: T) {
    warning(saved_locally_text(what));
}

/// Confirmation after the offline queue was replayed.
pub fn synced(count: usize) {
    success(synced_text(count));
}

fn saved_locally_text<T: fmt::Display>(what: T) -> String {
    format!(
        "You are offline. {} was saved locally and will be synced when you reconnect.",
        what
    )
}

fn synced_text(count: usize) -> String {
    format!(
        "Data synced: {} offline attendance record(s) have been synced.",
        count
    )
}

/// Section header

pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}{}====================== {}\n{}",
        FG_BLUE, BOLD, msg, RESET
    );
}
