use crate::config::Config;
use crate::core::demo::DemoLogic;
use crate::core::session::Session;
use crate::db::initialize::open_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

use crate::cli::parser::{Cli, Commands};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - with `--demo`, the sample student and their history
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init { demo } = &cli.command else {
        return Ok(());
    };

    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rattendance…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let mut pool = open_db(&db_path)?;

    println!("✅ Database initialized at {}", &db_path);

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    if *demo {
        let student = DemoLogic::seed(&mut pool)?;
        let mut session = Session::open(pool)?;
        session.switch_student(student.clone())?;
        session.close()?;
        success(format!(
            "Demo student {} ({}) is now active.",
            student.name, student.id
        ));
    }

    println!("🎉 rattendance initialization completed!");
    Ok(())
}
