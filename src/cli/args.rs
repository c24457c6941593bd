//! CLI argument definitions for `SelectorHelper`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use selector_helper::config::ConfigOverrides;
use selector_helper::core::report::ReportFormat;
use selector_helper::logger::Level;
use selector_helper::models::TimeSlot;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `catalog`, `state_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SelectSubcommand {
    /// Add courses to the selection by code.
    Add {
        /// Course codes
        #[arg(value_name = "CODES", num_args = 1..)]
        ids: Vec<String>,
    },
    /// Remove courses from the selection by code.
    Remove {
        /// Course codes
        #[arg(value_name = "CODES", num_args = 1..)]
        ids: Vec<String>,
    },
    /// Remove every selected course.
    Clear,
    /// List the selected courses with their totals.
    List,
}

#[derive(Debug, Subcommand)]
pub enum RegisterSubcommand {
    /// Mark selected courses for registration.
    Mark {
        /// Course codes
        #[arg(value_name = "CODES", num_args = 1..)]
        ids: Vec<String>,
    },
    /// Drop courses from the registration list.
    Unmark {
        /// Course codes
        #[arg(value_name = "CODES", num_args = 1..)]
        ids: Vec<String>,
    },
    /// Set the registration weight of a course (0-100).
    Weight {
        /// Course code
        #[arg(value_name = "CODE")]
        id: String,
        /// Weight; values outside 0-100 are clamped, non-numbers become 0
        #[arg(value_name = "WEIGHT", allow_hyphen_values = true)]
        value: String,
    },
    /// List the courses marked for registration.
    List,
}

#[derive(Debug, Subcommand)]
pub enum OrderSubcommand {
    /// Show the bucket order.
    List,
    /// Move the bucket at position FROM to position TO (1-based).
    Move {
        /// Current position
        #[arg(value_name = "FROM")]
        from: usize,
        /// New position
        #[arg(value_name = "TO")]
        to: usize,
    },
    /// Enable or disable a bucket.
    Toggle {
        /// Bucket id (e.g., `random-courses`)
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Restore the default bucket order.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum DetectiveSubcommand {
    /// Inspect or change the bucket order.
    Order {
        #[command(subcommand)]
        subcommand: OrderSubcommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Search the catalog.
    ///
    /// Free-text keywords must all appear in the name, teacher, programs,
    /// code or department. Advanced filters narrow the result further.
    Search {
        /// Free-text keywords (replaces the stored search text when given)
        #[arg(value_name = "KEYWORDS")]
        query: Vec<String>,

        /// Text filter, e.g. `name=微積分, 物理` (repeatable)
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,

        /// Filter logic, e.g. `teacher=exclude` (repeatable)
        #[arg(long = "logic", value_name = "FIELD=LOGIC")]
        logic: Vec<String>,

        /// Enable an option, e.g. `weekday=Monday` or `period=5,6` (repeatable)
        #[arg(long = "option", value_name = "FIELD=OPTION")]
        options: Vec<String>,

        /// Disable a filter field (repeatable)
        #[arg(long = "off", value_name = "FIELD")]
        off: Vec<String>,

        /// Reset the search text and every advanced filter first
        #[arg(long)]
        clear: bool,

        /// Hide courses that clash with the selection
        #[arg(long, conflicts_with = "show_conflicts")]
        hide_conflicts: bool,

        /// Keep courses that clash with the selection
        #[arg(long)]
        show_conflicts: bool,

        /// List the selected courses instead of the search result
        #[arg(long)]
        selected_only: bool,

        /// List the options of an enumerable field and exit
        #[arg(long, value_name = "FIELD")]
        list_options: Option<String>,

        /// Maximum number of courses to print
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,

        /// Remember the filters for the next search
        #[arg(long)]
        save: bool,
    },
    /// List the compulsory courses of a department, grade and class.
    Required {
        /// Department name
        #[arg(long, value_name = "DEPT")]
        department: Option<String>,

        /// Grade (1-4, 0 for unrestricted)
        #[arg(long, value_name = "GRADE")]
        grade: Option<String>,

        /// Class label (甲班, 乙班, 全英班 or 不分班)
        #[arg(long, value_name = "CLASS")]
        class: Option<String>,

        /// Forget the stored required-course filters
        #[arg(long)]
        clear: bool,
    },
    /// Manage the selected courses.
    Select {
        #[command(subcommand)]
        subcommand: SelectSubcommand,
    },
    /// Render the weekly schedule of the selection.
    Schedule {
        /// Output format: text, markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: ReportFormat,

        /// Output file (text prints to stdout when omitted; other formats go to `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Rank catalog courses by the detective bucket order.
    Detective {
        /// Toggle a time slot, e.g. `Monday:5` or `三:B` (repeatable)
        #[arg(long = "slot", value_name = "DAY:PERIOD")]
        slots: Vec<TimeSlot>,

        /// Forget every chosen time slot
        #[arg(long)]
        clear_slots: bool,

        /// Seed for the shuffled buckets
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Maximum number of courses to print
        #[arg(short = 'n', long, value_name = "N", default_value_t = 20)]
        limit: usize,

        #[command(subcommand)]
        subcommand: Option<DetectiveSubcommand>,
    },
    /// Manage the registration list and weights.
    Register {
        #[command(subcommand)]
        subcommand: RegisterSubcommand,
    },
    /// Generate the registration console script.
    Export {
        /// Write the script to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import a registration script or its code.
    Import {
        /// File holding the script (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// List the catalog snapshots in a directory.
    Versions {
        /// Snapshot directory (defaults to the configured catalog)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "selectorhelper",
    about = "Course-selection planner: search the catalog, build a timetable and prepare registration",
    version = selector_helper::core::get_version()
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Catalog file or snapshot directory
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Session state file
    #[arg(long = "state-file", value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            catalog: self.catalog.as_ref().map(path_string),
            state_file: self.state_file.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_library() {
        use clap::CommandFactory;
        let command = Cli::command();
        assert_eq!(command.get_version(), Some(selector_helper::core::get_version()));
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["selectorhelper", "config"]);

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.catalog.is_none());
        assert!(overrides.state_file.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "selectorhelper",
            "--config-level",
            "debug",
            "--config-verbose",
            "yes",
            "--catalog",
            "/data/all_classes.csv",
            "--state-file",
            "/tmp/state.json",
            "schedule",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.catalog, Some("/data/all_classes.csv".to_string()));
        assert_eq!(overrides.state_file, Some("/tmp/state.json".to_string()));
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_detective_arguments() {
        let cli = Cli::parse_from([
            "selectorhelper",
            "detective",
            "--slot",
            "Monday:5",
            "--slot",
            "三:b",
            "--seed",
            "7",
            "order",
            "toggle",
            "random-courses",
        ]);

        let Command::Detective { slots, seed, subcommand, .. } = cli.command else {
            panic!("expected detective command");
        };
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].period, 'B');
        assert_eq!(seed, Some(7));
        assert!(matches!(
            subcommand,
            Some(DetectiveSubcommand::Order { subcommand: OrderSubcommand::Toggle { .. } })
        ));
    }

    #[test]
    fn test_schedule_format_parses() {
        let cli = Cli::parse_from(["selectorhelper", "schedule", "-f", "md"]);
        assert!(matches!(
            cli.command,
            Command::Schedule { format: ReportFormat::Markdown, output: None }
        ));
    }
}
