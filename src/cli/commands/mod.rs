pub mod backup;
pub mod capture;
pub mod config;
pub mod courses;
pub mod db;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod mark;
pub mod net;
pub mod report;
pub mod stats;
pub mod status;
pub mod student;
pub mod sync;

use crate::config::Config;
use crate::core::attendance::Upsert;
use crate::core::session::{MarkOutcome, Session};
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::course::Course;
use crate::models::record::AttendanceRecord;
use crate::ui::messages::{info, saved_locally, success};

/// Open the configured database and hydrate the session from it.
pub(crate) fn open_session(cfg: &Config) -> AppResult<Session<DbPool>> {
    let pool = open_db(&cfg.database)?;
    Session::open(pool)
}

/// Tell the user where a mark ended up.
pub(crate) fn announce_mark(course: &Course, record: &AttendanceRecord, outcome: MarkOutcome) {
    let date = record.date_str();
    let status = record.status.as_str();

    match outcome {
        MarkOutcome::Applied(Upsert::Inserted) => success(format!(
            "Marked {} for {} ({}) on {}.",
            status, course.name, course.id, date
        )),
        MarkOutcome::Applied(Upsert::Replaced) => success(format!(
            "Updated {} ({}) on {} to {}.",
            course.name, course.id, date, status
        )),
        MarkOutcome::Applied(Upsert::Unchanged) => info(format!(
            "{} ({}) on {} is already recorded as {}.",
            course.name, course.id, date, status
        )),
        MarkOutcome::Queued(_) => {
            saved_locally(format!("{} for {} on {}", status, course.id, date))
        }
    }
}
