use crate::ai::HttpOracle;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{ReportLogic, Thresholds};
use crate::db::initialize::open_db;
use crate::db::queries::{load_students, require_course};
use crate::errors::AppResult;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::color_for_standing;
use crate::utils::formatting::{bold, pct, progress_bar};
use crate::utils::table::{Cell, Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { course, ai } = cmd else {
        return Ok(());
    };

    let pool = open_db(&cfg.database)?;
    let course = require_course(&pool, course.as_deref())?;
    let students = load_students(&pool)?;

    let roster =
        ReportLogic::build_roster(&pool, &course, &students, Thresholds::from_config(cfg))?;

    header(format!("Course report: {} ({})", course.name, course.id));
    println!(
        "{:<20} {} {}",
        "Overall attendance:",
        progress_bar(roster.overall.percentage, 20),
        bold(&pct(roster.overall.percentage))
    );
    println!("{:<20} {}", "Enrolled students:", roster.student_count());
    println!();

    if roster.entries.is_empty() {
        info("No registered students.");
    } else {
        let mut table = Table::new(vec![
            Column::left("Student"),
            Column::left("ID"),
            Column::right("Present"),
            Column::right("%"),
            Column::left("Status"),
        ]);
        for e in &roster.entries {
            table.add_row(vec![
                e.student.name.clone().into(),
                e.student.id.clone().into(),
                format!("{}/{}", e.stats.present, e.stats.total).into(),
                pct(e.stats.percentage).into(),
                Cell::colored(e.standing.label(), color_for_standing(e.standing)),
            ]);
        }
        print!("{}", table.render());
    }

    if *ai {
        println!();
        match HttpOracle::from_config(cfg).and_then(|oracle| ReportLogic::summarize(&oracle, &roster)) {
            Ok(text) => {
                header("AI summary");
                println!("{}", textwrap::fill(&text, cfg.report_width.max(20)));
            }
            Err(e) => warning(e),
        }
    }

    Ok(())
}
