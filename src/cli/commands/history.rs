use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::CourseStats;
use crate::db::queries::require_course;
use crate::errors::{AppError, AppResult};
use crate::models::record::AttendanceRecord;
use crate::ui::messages::{header, info};
use crate::utils::colors::color_for_status;
use crate::utils::formatting::pct;
use crate::utils::table::{Cell, Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::History { course } = cmd else {
        return Ok(());
    };

    let session = open_session(cfg)?;
    let student = session.student().ok_or(AppError::NoActiveStudent)?;

    let only = match course {
        Some(c) => Some(require_course(session.store(), Some(c.as_str()))?),
        None => None,
    };

    let mut rows: Vec<(&str, AttendanceRecord)> = session
        .attendance()
        .data()
        .iter()
        .filter(|(id, _)| only.as_ref().is_none_or(|c| &c.id == *id))
        .flat_map(|(id, records)| records.iter().map(move |r| (id.as_str(), *r)))
        .collect();

    // Newest first, then by course.
    rows.sort_by(|a, b| b.1.date.cmp(&a.1.date).then_with(|| a.0.cmp(b.0)));

    match &only {
        Some(c) => header(format!("History of {} in {} ({})", student.name, c.name, c.id)),
        None => header(format!("History of {} ({})", student.name, student.id)),
    }

    if rows.is_empty() {
        info("No attendance records yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("Date"),
        Column::left("Course"),
        Column::left("Status"),
    ]);
    for (course_id, record) in &rows {
        table.add_row(vec![
            record.date_str().into(),
            (*course_id).into(),
            Cell::colored(record.status.as_str(), color_for_status(record.status)),
        ]);
    }
    print!("{}", table.render());

    let records: Vec<AttendanceRecord> = rows.iter().map(|(_, r)| *r).collect();
    let stats = CourseStats::from_records(&records);
    println!();
    println!(
        "Present: {}  Absent: {}  Attendance: {}",
        stats.present,
        stats.absent(),
        pct(stats.percentage)
    );

    Ok(())
}
