/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

use crate::core::report::Standing;
use crate::models::status::AttendanceStatus;

pub fn color_for_standing(standing: Standing) -> &'static str {
    match standing {
        Standing::Good => GREEN,
        Standing::AtRisk => YELLOW,
        Standing::Poor => RED,
    }
}

pub fn color_for_status(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Absent => RED,
    }
}

/// Wrap `value` in `color`, greying it out when empty.
pub fn colorize(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
