use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rattendance
/// Offline-first attendance tracking with photo verification, backed by SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "An offline-first attendance tracker: capture, verify and sync class attendance using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NetState {
    Online,
    Offline,
    Status,
}

#[derive(Subcommand)]
pub enum StudentAction {
    /// Register a new student and make them active
    Signup {
        #[arg(long, help = "Student ID (e.g. UMAT2024001)")]
        id: String,

        #[arg(long, help = "Full name")]
        name: String,

        #[arg(long, value_name = "FILE", help = "Enrolled photo (png, jpg, webp)")]
        photo: Option<String>,
    },

    /// Make a registered student the active one
    Switch {
        /// Student ID
        id: String,
    },

    /// Show the active student's profile
    Show,

    /// Replace the active student's enrolled photo
    Photo {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// List registered students
    List,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        #[arg(long = "demo", help = "Seed the sample student and attendance history")]
        demo: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", help = "Only rows of this operation (mark, queue, sync, ...)")]
        operation: Option<String>,
    },

    /// Register, switch or inspect students
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// List the available courses
    Courses,

    /// Mark attendance with a verified photo capture
    Capture {
        #[arg(long, help = "Course ID (e.g. MIN101)")]
        course: Option<String>,

        #[arg(long, value_name = "FILE", help = "Live photo to verify")]
        photo: String,

        #[arg(long, help = "Date of the class (YYYY-MM-DD, default: today)")]
        date: Option<String>,

        #[arg(long, short = 'y', help = "Mark without asking for confirmation")]
        yes: bool,
    },

    /// Mark attendance manually
    Mark {
        /// Course ID (e.g. MIN101)
        course: String,

        #[arg(long, help = "Date of the class (YYYY-MM-DD, default: today)")]
        date: Option<String>,

        #[arg(long, default_value = "present", help = "present or absent")]
        status: String,
    },

    /// Attendance overview of the active student
    Stats,

    /// Attendance history of the active student
    History {
        #[arg(long, help = "Only this course")]
        course: Option<String>,
    },

    /// Course roll-up across all registered students
    Report {
        #[arg(long, help = "Course ID (e.g. GEO202)")]
        course: Option<String>,

        #[arg(long = "ai", help = "Append an AI-generated summary")]
        ai: bool,
    },

    /// Set or show the connectivity state
    Net {
        #[arg(value_enum)]
        state: NetState,
    },

    /// Replay the offline queue now
    Sync,

    /// Active student, connectivity and pending queue
    Status,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the active student's attendance records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Only this course")]
        course: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
