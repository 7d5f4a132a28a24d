use super::status::AttendanceStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One student's presence or absence on one date for one course.
/// The course is implied by the list holding the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate, // serialized as "YYYY-MM-DD"
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(date: NaiveDate, status: AttendanceStatus) -> Self {
        Self { date, status }
    }

    pub fn present(date: NaiveDate) -> Self {
        Self::new(date, AttendanceStatus::Present)
    }

    pub fn absent(date: NaiveDate) -> Self {
        Self::new(date, AttendanceStatus::Absent)
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// courseId → records, in insertion order.
/// Invariant: at most one record per (courseId, date).
pub type AttendanceData = BTreeMap<String, Vec<AttendanceRecord>>;
