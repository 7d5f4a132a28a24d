use crate::ai::{HttpOracle, data_uri};
use crate::cli::commands::{announce_mark, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::{CaptureLogic, CaptureOutcome};
use crate::db::queries::require_course;
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;
use crate::ui::messages::{error, info, success};
use crate::ui::prompt::confirm;
use crate::utils::date::resolve_date;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Capture {
        course,
        photo,
        date,
        yes,
    } = cmd
    {
        let mut session = open_session(cfg)?;
        let course = require_course(session.store(), course.as_deref())?;
        let date = resolve_date(date.as_deref())?;
        let live = data_uri::encode_file(&expand_tilde(photo))?;

        let oracle = HttpOracle::from_config(cfg)?;
        info(format!("Verifying capture for {} ({})…", course.name, course.id));

        let outcome = CaptureLogic::capture(&mut session, &oracle, &course, &live, date, |v| {
            success(format!(
                "Verification successful ({:.0}% confidence): {}",
                v.confidence_pct(),
                v.reason
            ));
            if *yes {
                Ok(true)
            } else {
                confirm("Mark as Present?")
            }
        })?;

        match outcome {
            CaptureOutcome::Rejected(v) => {
                error(format!(
                    "Impersonation alert ({:.0}% confidence): {}. Attendance not marked.",
                    v.confidence_pct(),
                    v.reason
                ));
            }
            CaptureOutcome::Declined(_) => info("Attendance not marked."),
            CaptureOutcome::Marked { outcome, .. } => {
                announce_mark(&course, &AttendanceRecord::present(date), outcome);
            }
        }

        session.close()?;
    }

    Ok(())
}
