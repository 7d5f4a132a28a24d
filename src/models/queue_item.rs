use super::record::AttendanceRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A write recorded while offline, not yet applied to the attendance store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub course_id: String,
    pub record: AttendanceRecord,
}

impl QueueItem {
    pub fn new(course_id: impl Into<String>, record: AttendanceRecord) -> Self {
        Self {
            course_id: course_id.into(),
            record,
        }
    }

    /// True when this item targets the same (courseId, date) slot.
    pub fn same_slot(&self, course_id: &str, date: NaiveDate) -> bool {
        self.course_id == course_id && self.record.date == date
    }
}
