use crate::cli::commands::{announce_mark, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::require_course;
use crate::errors::{AppError, AppResult};
use crate::models::record::AttendanceRecord;
use crate::models::status::AttendanceStatus;
use crate::utils::date::resolve_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark {
        course,
        date,
        status,
    } = cmd
    {
        let status = AttendanceStatus::from_code(status)
            .ok_or_else(|| AppError::InvalidStatus(status.clone()))?;
        let date = resolve_date(date.as_deref())?;

        let mut session = open_session(cfg)?;
        let course = require_course(session.store(), Some(course.as_str()))?;

        let record = AttendanceRecord::new(date, status);
        let outcome = session.mark(&course.id, record)?;
        announce_mark(&course, &record, outcome);

        session.close()?;
    }

    Ok(())
}
