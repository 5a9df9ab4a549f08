use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI application to track student organization attendance with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Student organization attendance: students, events, attendance records and QR check-in on SQLite",
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

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE", help = "Absolute path of the backup file")]
        file: String,

        #[arg(long, help = "Zip the copy and remove the uncompressed file")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Manage students
    Student {
        #[command(subcommand)]
        action: StudentCmd,
    },

    /// Manage events
    Event {
        #[command(subcommand)]
        action: EventCmd,
    },

    /// Manage attendance records (sessions of an event)
    Record {
        #[command(subcommand)]
        action: RecordCmd,
    },

    /// Take and inspect attendance
    Attendance {
        #[command(subcommand)]
        action: AttendanceCmd,
    },

    /// Export a record or event report
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },

    /// Show overall counters (students, events, records, statuses)
    Summary,
}

#[derive(Subcommand)]
pub enum StudentCmd {
    /// Add a student
    Add {
        /// Student ID (externally assigned, e.g. 2023-0001)
        id: String,
        /// First name
        name: String,
        /// Year level
        year_level: String,
        /// Course
        course: String,
    },

    /// Edit a student (existing attendance entries keep their copy)
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "year")]
        year_level: Option<String>,

        #[arg(long)]
        course: Option<String>,
    },

    /// Delete a student and all their attendance entries
    Del {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List all students
    List,

    /// Search students by id, name, year level or course (case-sensitive)
    Search { query: String },

    /// Import students from a CSV file (header row, first four columns used)
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Export all students to CSV
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EventCmd {
    /// Add an event (date defaults to today)
    Add {
        name: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    /// Edit an event
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    /// Delete an event with all its records and attendance entries
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List events, newest first
    List,

    /// Show the attendance of every record of an event
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum RecordCmd {
    /// Create an attendance record for an event
    Add {
        event_id: i64,
        name: String,
    },

    /// List records, newest first
    List {
        #[arg(long = "event", help = "Only records of this event")]
        event: Option<i64>,
    },

    /// Show a record with its event and status counts
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum AttendanceCmd {
    /// Give every student an Absent entry in the record (idempotent)
    Init { record: i64 },

    /// Set the status of an existing entry
    Set {
        record: i64,
        student: String,
        /// Present, Absent or Excused (or P/A/E)
        status: String,
    },

    /// Change many entries at once (all-or-nothing)
    Bulk {
        record: i64,

        #[arg(
            long = "all",
            value_name = "STATUS",
            conflicts_with_all = ["set", "from_json"],
            help = "Set every entry of the record to STATUS"
        )]
        all: Option<String>,

        #[arg(
            long = "set",
            value_name = "ID=STATUS",
            conflicts_with = "from_json",
            help = "Explicit pair, repeatable"
        )]
        set: Vec<String>,

        #[arg(
            long = "from-json",
            value_name = "FILE",
            help = "Read {\"status\": ...} or {\"updates\": [...]} from a JSON file"
        )]
        from_json: Option<String>,
    },

    /// Check a student in (marks Present, creates the entry if needed)
    Checkin {
        record: i64,
        identifier: String,

        #[arg(long, help = "Identifier is a raw QR payload")]
        qr: bool,
    },

    /// Quick-mark toggle of an existing entry
    Toggle { record: i64, student: String },

    /// List entries of a record
    List {
        record: i64,

        #[arg(long, value_name = "STATUS", help = "Present, Absent, Excused or all")]
        status: Option<String>,
    },

    /// Search entries of a record (case-sensitive)
    Search { record: i64, query: String },

    /// Every student with their status in the record ("Not Marked" if none)
    Roster { record: i64 },

    /// Status counts of a record
    Summary { record: i64 },
}

#[derive(Subcommand)]
pub enum ExportTarget {
    /// Export one attendance record
    Record {
        id: i64,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export every record of an event
    Event {
        id: i64,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
