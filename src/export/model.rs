// src/export/model.rs

use crate::core::attendance::AttendanceStore;
use crate::models::course::Course;
use serde::Serialize;

/// Flat row for the attendance export.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub student_id: String,
    pub course_id: String,
    pub course_name: String,
    pub date: String,
    pub status: String,
}

/// Flatten a student's history, course by course, dates ascending.
pub(crate) fn records_to_rows(
    student_id: &str,
    store: &AttendanceStore,
    courses: &[Course],
    only_course: Option<&str>,
) -> Vec<RecordExport> {
    let mut rows = Vec::new();

    for (course_id, records) in store.data() {
        if let Some(only) = only_course
            && only != course_id
        {
            continue;
        }

        let course_name = courses
            .iter()
            .find(|c| &c.id == course_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        let mut sorted = records.clone();
        sorted.sort_by_key(|r| r.date);

        rows.extend(sorted.into_iter().map(|r| RecordExport {
            student_id: student_id.to_string(),
            course_id: course_id.clone(),
            course_name: course_name.clone(),
            date: r.date_str(),
            status: r.status.as_str().to_string(),
        }));
    }

    rows
}
