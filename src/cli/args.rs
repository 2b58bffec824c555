//! Command-line argument definitions for the `rto` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::models::AttendanceStatus;

/// Track return-to-office attendance against reporting period requirements.
#[derive(Debug, Parser)]
#[command(name = "rto", version)]
#[command(about = "Track return-to-office attendance compliance", long_about = None)]
pub struct Cli {
    /// Directory containing settings.yaml, periods.yaml and holidays.yaml
    #[arg(long, global = true, env = "RTO_CONFIG", default_value = "config")]
    pub config: PathBuf,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record attendance for a day
    Record {
        /// Attendance status: in-office or remote
        #[arg(value_parser = parse_status)]
        status: AttendanceStatus,

        /// Date to record (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Show compliance for the current reporting period
    Status {
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Report compliance for one or all reporting periods
    Report {
        /// Report on this period number
        #[arg(long, conflicts_with = "all")]
        period: Option<u32>,

        /// Report on every configured period
        #[arg(long)]
        all: bool,

        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Predict compliance if you attend the office on the given dates
    Plan {
        /// Planned in-office dates (YYYY-MM-DD)
        #[arg(required = true, value_parser = parse_date)]
        dates: Vec<NaiveDate>,

        /// Plan against this period number instead of the current one
        #[arg(long)]
        period: Option<u32>,

        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Inspect the loaded configuration
    Config {
        /// What to do with the configuration.
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// `config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the loaded settings
    Show,
    /// Load and validate every configuration file
    Validate,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format: {}. Use YYYY-MM-DD format.", value))
}

fn parse_status(value: &str) -> Result<AttendanceStatus, String> {
    value.parse::<AttendanceStatus>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_record_with_date() {
        let cli = Cli::try_parse_from(["rto", "record", "in-office", "--date", "2025-08-18"]).unwrap();
        match cli.command {
            Command::Record { status, date } => {
                assert_eq!(status, AttendanceStatus::InOffice);
                assert_eq!(date, Some(make_date("2025-08-18")));
            }
            other => panic!("Expected Record, got {:?}", other),
        }
    }

    #[test]
    fn test_config_dir_defaults_to_config() {
        let cli = Cli::try_parse_from(["rto", "status"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config"));
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["rto", "status", "--config", "/etc/rto"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/rto"));
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["rto", "record", "hybrid"]).is_err());
    }

    #[test]
    fn test_rejects_malformed_date() {
        let err = Cli::try_parse_from(["rto", "status", "--as-of", "18/08/2025"]).unwrap_err();
        assert!(err.to_string().contains("Use YYYY-MM-DD format"));
    }

    #[test]
    fn test_report_period_conflicts_with_all() {
        assert!(Cli::try_parse_from(["rto", "report", "--period", "1", "--all"]).is_err());
    }

    #[test]
    fn test_plan_requires_dates() {
        assert!(Cli::try_parse_from(["rto", "plan"]).is_err());

        let cli = Cli::try_parse_from(["rto", "plan", "2025-11-03", "2025-11-04", "--json"]).unwrap();
        match cli.command {
            Command::Plan { dates, json, .. } => {
                assert_eq!(dates.len(), 2);
                assert!(json);
            }
            other => panic!("Expected Plan, got {:?}", other),
        }
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["rto", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigCommand::Validate
            }
        ));
    }
}
