use crate::cli::commands::open_session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut session = open_session(cfg)?;

    let report = session.sync_now()?;
    if report.synced == 0 {
        info("Nothing to sync.");
    }

    session.close()?;
    Ok(())
}
