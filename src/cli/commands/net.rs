use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, NetState};
use crate::config::Config;
use crate::core::connectivity::Connectivity;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Net { state } = cmd else {
        return Ok(());
    };

    let mut session = open_session(cfg)?;
    let before = session.connectivity();

    let next = match state {
        NetState::Status => {
            info(format!(
                "Connectivity: {} ({} record(s) pending sync)",
                before.as_str(),
                session.queue().len()
            ));
            return Ok(());
        }
        NetState::Online => Connectivity::Online,
        NetState::Offline => Connectivity::Offline,
    };

    if before == next {
        info(format!("Already {}.", next.as_str()));
    }

    let report = session.set_connectivity(next)?;

    if before != next {
        match next {
            Connectivity::Online => {
                success("You are back online.");
                if report.is_none_or(|r| r.synced == 0) {
                    info("Nothing to sync.");
                }
            }
            Connectivity::Offline => warning(
                "You are offline. Attendance will be saved locally and synced when you reconnect.",
            ),
        }
    }

    session.close()?;
    Ok(())
}
