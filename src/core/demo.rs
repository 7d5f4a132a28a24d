//! Sample student and history for `init --demo`.

use crate::core::attendance::AttendanceStore;
use crate::core::keys;
use crate::db::kv::{KeyValueStore, audit_quietly, save_json};
use crate::db::pool::DbPool;
use crate::db::queries::{find_student, insert_student};
use crate::errors::AppResult;
use crate::models::record::{AttendanceData, AttendanceRecord};
use crate::models::student::Student;
use chrono::NaiveDate;

pub const DEMO_ID: &str = "UMAT2024001";
pub const DEMO_NAME: &str = "Kofi Mensah";

/// 1x1 PNG used as the demo student's enrolled photo.
const DEMO_PHOTO: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const DEMO_HISTORY: &[(&str, &[(u32, bool)])] = &[
    ("MIN101", &[(15, true), (17, true), (22, true)]),
    ("GEO202", &[(16, true), (18, false), (23, true)]),
    ("CSE305", &[(15, true), (17, true), (22, true), (24, true)]),
    ("ELE401", &[(16, true), (23, true)]),
];

fn demo_data() -> AttendanceData {
    DEMO_HISTORY
        .iter()
        .map(|(course, days)| {
            let records = days
                .iter()
                .filter_map(|(d, present)| {
                    let date = NaiveDate::from_ymd_opt(2024, 7, *d)?;
                    Some(if *present {
                        AttendanceRecord::present(date)
                    } else {
                        AttendanceRecord::absent(date)
                    })
                })
                .collect();
            (course.to_string(), records)
        })
        .collect()
}

pub struct DemoLogic;

impl DemoLogic {
    /// Register the demo student with the sample history. An existing
    /// history for the demo student is left alone.
    pub fn seed(pool: &mut DbPool) -> AppResult<Student> {
        let student = Student::new(DEMO_ID, DEMO_NAME);

        if find_student(pool, DEMO_ID)?.is_none() {
            insert_student(pool, &student)?;
        }
        if pool.get(&keys::photo(DEMO_ID))?.is_none() {
            save_json(pool, &keys::photo(DEMO_ID), &DEMO_PHOTO)?;
        }
        if pool.get(&keys::attendance(DEMO_ID))?.is_none() {
            AttendanceStore::from_data(demo_data()).save(pool, DEMO_ID)?;
            audit_quietly(pool, "init", DEMO_ID, "Demo attendance history seeded");
        }

        Ok(student)
    }
}
