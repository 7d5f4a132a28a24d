use crate::models::record::AttendanceRecord;
use serde::Serialize;

/// Derived counters for a list of records. Always recomputed from the records,
/// never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CourseStats {
    pub present: usize,
    pub total: usize,
    pub percentage: f64,
}

impl CourseStats {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let present = records.iter().filter(|r| r.status.is_present()).count();
        Self::from_counts(present, records.len())
    }

    pub fn from_counts(present: usize, total: usize) -> Self {
        Self {
            present,
            total,
            percentage: percentage(present, total),
        }
    }

    pub fn absent(&self) -> usize {
        self.total - self.present
    }

    /// Sum two sets of counters, recomputing the percentage.
    pub fn combine(self, other: CourseStats) -> Self {
        Self::from_counts(self.present + other.present, self.total + other.total)
    }

    /// Share of the scheduled classes attended so far, when the course
    /// declares a class count.
    pub fn progress(&self, total_classes: Option<i64>) -> Option<f64> {
        match total_classes {
            Some(n) if n > 0 => Some(self.present as f64 / n as f64 * 100.0),
            _ => None,
        }
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64 * 100.0
    } else {
        0.0
    }
}
