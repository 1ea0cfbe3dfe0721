//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "PLANNER_STATE_DIR";

/// Planner - book project phases and meetings into employee calendars
#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = STATE_DIR_ENV)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project from a JSON request and schedule its phases
    Schedule {
        /// Path to the project request file
        #[arg(required = true)]
        request: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Book a meeting for one or more employees
    Meeting {
        /// Meeting title
        #[arg(short, long)]
        title: String,

        /// Meeting date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// First hour
        #[arg(long)]
        start: u8,

        /// End hour (exclusive)
        #[arg(long)]
        end: u8,

        /// Participant employee ID (repeatable)
        #[arg(short, long = "participant", required = true)]
        participants: Vec<String>,

        /// Organizer user ID
        #[arg(long)]
        created_by: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the first free slot of an employee on a date
    FreeSlot {
        /// Employee ID
        #[arg(short, long)]
        employee: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Slot length in hours
        #[arg(long)]
        hours: u8,
    },

    /// Show the first slot free for every given employee
    CommonSlot {
        /// Employee ID (repeatable)
        #[arg(short, long = "employee", required = true)]
        employees: Vec<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Slot length in hours
        #[arg(long)]
        hours: u8,
    },

    /// Find the next business day with room for a block
    NextDay {
        /// Employee ID
        #[arg(short, long)]
        employee: String,

        /// First date to look at (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Slot length in hours
        #[arg(long)]
        hours: u8,

        /// Calendar days to search (default: configured horizon)
        #[arg(long)]
        horizon: Option<u32>,
    },

    /// Record a leave period
    Leave {
        /// Employee ID
        #[arg(short, long)]
        employee: String,

        /// First day of leave (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of leave, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Record as pending instead of approved
        #[arg(long)]
        pending: bool,
    },

    /// List an employee's blocks
    Blocks {
        /// Employee ID
        #[arg(short, long)]
        employee: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for commands that print records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Returns the state directory path, using `~/.agency-planner` if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".agency-planner"))
                .unwrap_or_else(|| PathBuf::from(".agency-planner"))
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["planner"]).is_err());
    }

    #[test]
    fn test_cli_parse_schedule() {
        let cli =
            Cli::try_parse_from(["planner", "schedule", "request.json", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Schedule { request, format } => {
                assert_eq!(request, PathBuf::from("request.json"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected Schedule command"),
        }
    }

    #[test]
    fn test_cli_parse_meeting() {
        let cli = Cli::try_parse_from([
            "planner",
            "meeting",
            "--title",
            "Klantoverleg",
            "--date",
            "2024-03-12",
            "--start",
            "10",
            "--end",
            "11",
            "-p",
            "emp-anna",
            "-p",
            "emp-bram",
            "--created-by",
            "user-lead",
        ])
        .unwrap();
        match cli.command {
            Commands::Meeting {
                date,
                start,
                end,
                participants,
                format,
                ..
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
                assert_eq!((start, end), (10, 11));
                assert_eq!(participants, vec!["emp-anna", "emp-bram"]);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("Expected Meeting command"),
        }
    }

    #[test]
    fn test_cli_parse_common_slot() {
        let cli = Cli::try_parse_from([
            "planner",
            "common-slot",
            "-e",
            "a",
            "-e",
            "b",
            "--date",
            "2024-03-13",
            "--hours",
            "1",
        ])
        .unwrap();
        match cli.command {
            Commands::CommonSlot { employees, hours, .. } => {
                assert_eq!(employees.len(), 2);
                assert_eq!(hours, 1);
            }
            _ => panic!("Expected CommonSlot command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "planner",
            "free-slot",
            "-e",
            "a",
            "--date",
            "13-03-2024",
            "--hours",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_state_dir_flag() {
        let cli = Cli::try_parse_from(["planner", "-s", "/tmp/plan", "blocks", "-e", "a"]).unwrap();
        assert_eq!(cli.state_dir(), PathBuf::from("/tmp/plan"));
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::try_parse_from(["planner", "-vv", "blocks", "-e", "a"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
