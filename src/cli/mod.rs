//! Command-line interface for the RTO compliance engine.
//!
//! This module parses arguments, loads configuration and attendance, and
//! renders compliance results as text or JSON.

mod args;
mod commands;
mod context;
mod output;

pub use args::{Cli, Command, ConfigCommand};
pub use commands::{plan, record, report, run, status};
pub use context::AppContext;
pub use output::{format_plan, format_report, format_status, risk_warning, to_json};
