use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::{DEFAULT_TASKS_FILE, Priority};
use crate::profile::DEFAULT_CONFIG_FILE;
use crate::sort::SortKey;

#[derive(Parser)]
#[command(name = "mindnav", version, about = "Personal organizer: tasks and notes")]
pub struct Cli {
    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Task snapshot file
    #[arg(long = "tasks-file", global = true, default_value = DEFAULT_TASKS_FILE)]
    pub tasks_file: PathBuf,

    /// Profile configuration file
    #[arg(long = "config-file", global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to the end of the list
    #[command(aliases = ["a", "new"])]
    Add {
        /// Task title, e.g. "Buy milk"
        title: String,

        /// Optional description
        #[arg(short = 'd', long = "desc", default_value = "")]
        desc: String,

        /// Due time: "DD.MM.YYYY HH:MM", "YYYY-MM-DD", "today", "tomorrow 09:00"
        #[arg(long = "due")]
        due: Option<String>,

        /// Priority
        #[arg(short = 'p', long = "priority", value_enum, default_value_t = Priority::Medium)]
        priority: Priority,

        /// Mark as important right away
        #[arg(short = 'i', long = "important")]
        important: bool,
    },

    /// Change fields of an active task
    #[command(alias = "e")]
    Edit {
        id: u64,

        #[arg(long = "title")]
        title: Option<String>,

        #[arg(short = 'd', long = "desc")]
        desc: Option<String>,

        #[arg(long = "due")]
        due: Option<String>,

        #[arg(short = 'p', long = "priority", value_enum)]
        priority: Option<Priority>,
    },

    /// Show the active list
    #[command(aliases = ["ls", "l"])]
    List {
        /// Only tasks with this priority
        #[arg(short = 'p', long = "priority", value_enum)]
        priority: Option<Priority>,

        /// Only starred tasks
        #[arg(short = 'i', long = "important")]
        important: bool,

        /// Hide done tasks that are not archived yet
        #[arg(long = "hide-done")]
        hide_done: bool,

        /// Search title and description
        #[arg(short = 'q', long = "query")]
        query: Option<String>,

        /// Sort key
        #[arg(short = 's', long = "sort", value_enum, default_value_t = SortKey::Order)]
        sort: SortKey,

        /// Reverse the sort
        #[arg(long = "desc")]
        desc: bool,
    },

    /// Show one task
    Show { id: u64 },

    /// Check a task off and move it to the archive
    #[command(aliases = ["complete", "x"])]
    Done { id: u64 },

    /// Toggle the important star
    #[command(alias = "important")]
    Star { id: u64 },

    /// Move a task to a new position in the list
    #[command(alias = "mv")]
    Move {
        id: u64,

        /// Target position (0-based)
        #[arg(required_unless_present = "by", conflicts_with = "by")]
        index: Option<usize>,

        /// Shift by this many rows instead (negative moves up)
        #[arg(long = "by", allow_hyphen_values = true)]
        by: Option<isize>,
    },

    /// Delete a task from the list or the archive
    #[command(aliases = ["remove", "delete", "del"])]
    Rm { id: u64 },

    /// Show completed tasks
    Archive,

    /// Show tasks whose due time has passed
    Overdue,

    /// Export the active list (or the archive)
    Export {
        #[arg(short = 'f', long = "format", value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Export archived tasks instead
        #[arg(long = "archive")]
        archive: bool,
    },

    /// Manage note profiles
    #[command(alias = "p")]
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommand>,
    },

    /// Read or write the current profile's notes
    #[command(alias = "n")]
    Notes {
        #[command(subcommand)]
        command: Option<NotesCommand>,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// List profiles
    #[command(alias = "ls")]
    List,

    /// Register a profile
    Add { name: String, notes_file: String },

    /// Make a profile current
    #[command(alias = "use")]
    Switch { name: String },

    /// Remove a profile
    #[command(aliases = ["rm", "remove"])]
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum NotesCommand {
    /// Print the notes
    Show,

    /// Replace the notes with the given text
    Write { text: String },

    /// Append a line to the notes
    Append { text: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
    Csv,
    Text,
}
