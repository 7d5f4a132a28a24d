use crate::core::keys;
use crate::core::stats::CourseStats;
use crate::db::kv::{KeyValueStore, load_or_default, save_json};
use crate::errors::AppResult;
use crate::models::record::{AttendanceData, AttendanceRecord};

/// Effect of writing one record into a (courseId, date) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
    Unchanged,
}

/// Attendance history of one student, held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceStore {
    data: AttendanceData,
}

impl AttendanceStore {
    pub fn from_data(data: AttendanceData) -> Self {
        let mut store = Self::default();
        // Replaying through upsert enforces one record per (course, date)
        // even if the persisted list was written by something else.
        for (course_id, records) in data {
            for record in records {
                store.upsert(&course_id, record);
            }
        }
        store
    }

    /// Hydrate the persisted slice of `student_id` (empty when none exists).
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, student_id: &str) -> AppResult<Self> {
        let data: AttendanceData = load_or_default(store, &keys::attendance(student_id))?;
        Ok(Self::from_data(data))
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S, student_id: &str) -> AppResult<()> {
        save_json(store, &keys::attendance(student_id), &self.data)
    }

    /// Overwrite the record for the same date in place, or append it.
    pub fn upsert(&mut self, course_id: &str, record: AttendanceRecord) -> Upsert {
        let records = self.data.entry(course_id.to_string()).or_default();

        match records.iter_mut().find(|r| r.date == record.date) {
            Some(existing) if *existing == record => Upsert::Unchanged,
            Some(existing) => {
                *existing = record;
                Upsert::Replaced
            }
            None => {
                records.push(record);
                Upsert::Inserted
            }
        }
    }

    pub fn records(&self, course_id: &str) -> &[AttendanceRecord] {
        self.data.get(course_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, course_id: &str, record: &AttendanceRecord) -> Option<&AttendanceRecord> {
        self.records(course_id).iter().find(|r| r.date == record.date)
    }

    pub fn course_stats(&self, course_id: &str) -> CourseStats {
        CourseStats::from_records(self.records(course_id))
    }

    pub fn overall_stats(&self) -> CourseStats {
        self.data
            .values()
            .map(|records| CourseStats::from_records(records))
            .fold(CourseStats::default(), CourseStats::combine)
    }

    pub fn data(&self) -> &AttendanceData {
        &self.data
    }

    pub fn total_records(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }
}
