use crate::cli::commands::open_session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, YELLOW, color_for_status, colorize};
use crate::utils::table::{Cell, Column, Table};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let session = open_session(cfg)?;

    header("Status");

    let student = session
        .student()
        .map(|s| format!("{} ({})", s.name, s.id))
        .unwrap_or_else(|| "-".to_string());
    let connectivity = session.connectivity();
    let net_color = if connectivity.is_online() { GREEN } else { YELLOW };

    println!("{:<16} {}", "Active student:", colorize(&student, GREEN));
    println!("{:<16} {}", "Connectivity:", colorize(connectivity.as_str(), net_color));
    println!("{:<16} {}", "Pending sync:", session.queue().len());

    if !session.queue().is_empty() {
        println!();
        let mut table = Table::new(vec![
            Column::left("Course"),
            Column::left("Date"),
            Column::left("Status"),
        ]);
        for item in session.queue().items() {
            table.add_row(vec![
                item.course_id.clone().into(),
                item.record.date_str().into(),
                Cell::colored(item.record.status.as_str(), color_for_status(item.record.status)),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
