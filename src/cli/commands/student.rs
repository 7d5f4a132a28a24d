use crate::ai::data_uri;
use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, StudentAction};
use crate::config::Config;
use crate::core::student::StudentLogic;
use crate::db::queries::load_students;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::GREEN;
use crate::utils::formatting::{bold, pct};
use crate::utils::path::expand_tilde;
use crate::utils::table::{Cell, Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Student { action } = cmd else {
        return Ok(());
    };

    let mut session = open_session(cfg)?;

    match action {
        StudentAction::Signup { id, name, photo } => {
            let photo_uri = match photo {
                Some(p) => Some(data_uri::encode_file(&expand_tilde(p))?),
                None => None,
            };
            let student = StudentLogic::signup(&mut session, id, name, photo_uri)?;
            success(format!(
                "Student {} ({}) registered and active.",
                student.name, student.id
            ));
        }

        StudentAction::Switch { id } => {
            let student = StudentLogic::switch(&mut session, id)?;
            let overall = session.attendance().overall_stats();
            success(format!(
                "Active student: {} ({}), overall attendance {}.",
                student.name,
                student.id,
                pct(overall.percentage)
            ));
        }

        StudentAction::Show => {
            let student = session.student_with_photo()?;
            let overall = session.attendance().overall_stats();

            header("Profile");
            println!("{:<16} {}", "Name:", bold(&student.name));
            println!("{:<16} {}", "Student ID:", student.id);
            println!(
                "{:<16} {}",
                "Enrolled photo:",
                student
                    .enrolled_photo_data_uri
                    .as_deref()
                    .map(data_uri::describe)
                    .unwrap_or_else(|| "none".to_string())
            );
            println!(
                "{:<16} {} ({}/{} classes)",
                "Attendance:",
                pct(overall.percentage),
                overall.present,
                overall.total
            );
            println!("{:<16} {}", "Connectivity:", session.connectivity().as_str());
        }

        StudentAction::Photo { file } => {
            let id = session
                .student()
                .map(|s| s.id.clone())
                .ok_or(AppError::NoActiveStudent)?;
            let uri = data_uri::encode_file(&expand_tilde(file))?;
            session.set_enrolled_photo(&id, &uri)?;
            success(format!("Enrolled photo updated ({}).", data_uri::describe(&uri)));
        }

        StudentAction::List => {
            let students = load_students(session.store())?;
            if students.is_empty() {
                info("No registered students. Use `student signup` to add one.");
            } else {
                let active = session.student().map(|s| s.id.clone());
                let mut table = Table::new(vec![
                    Column::left(" "),
                    Column::left("ID"),
                    Column::left("Name"),
                ]);
                for s in students {
                    let marker = if active.as_deref() == Some(s.id.as_str()) {
                        Cell::colored("*", GREEN)
                    } else {
                        Cell::plain("")
                    };
                    table.add_row(vec![marker, s.id.into(), s.name.into()]);
                }
                print!("{}", table.render());
            }
        }
    }

    session.close()?;
    Ok(())
}
