use crate::cli::commands::open_session;
use crate::config::Config;
use crate::db::queries::load_courses;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, RED};
use crate::utils::formatting::{bold, pct, progress_bar};
use crate::utils::table::{Cell, Column, Table};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let session = open_session(cfg)?;
    let student = session.student().ok_or(AppError::NoActiveStudent)?;
    let overall = session.attendance().overall_stats();

    header(format!("Attendance overview: {} ({})", student.name, student.id));

    println!("{:<12} {}", "Overall:", bold(&pct(overall.percentage)));
    println!("{:<12} {}{}\x1b[0m", "Present:", GREEN, overall.present);
    println!("{:<12} {}{}\x1b[0m", "Absent:", RED, overall.absent());
    println!();

    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("Course"),
        Column::right("Present"),
        Column::right("%"),
        Column::left("Progress"),
    ]);

    for course in load_courses(session.store())? {
        let stats = session.course_stats(&course.id);
        let progress = match stats.progress(course.total_classes) {
            Some(p) => format!(
                "{} {}/{}",
                progress_bar(p, 20),
                stats.present,
                course.total_classes.unwrap_or_default()
            ),
            None => "-".to_string(),
        };

        table.add_row(vec![
            course.id.into(),
            course.name.into(),
            format!("{}/{}", stats.present, stats.total).into(),
            pct(stats.percentage).into(),
            Cell::plain(progress),
        ]);
    }

    print!("{}", table.render());

    if !session.queue().is_empty() {
        println!();
        println!(
            "{} record(s) waiting to sync are not counted yet.",
            session.queue().len()
        );
    }

    Ok(())
}
