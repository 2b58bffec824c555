//! Configuration loading and management for the RTO compliance engine.
//!
//! This module provides functionality to load the attendance policy,
//! reporting period definitions and holiday calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use rto_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config").unwrap();
//! let calendar = loader.config().calendar();
//! println!("Exclusion days: {}", calendar.exclusion_count());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ComplianceConfig, DataSettings, HolidayEntry, HolidaysFile, PeriodEntry, PeriodsFile,
    PolicySettings, Settings,
};
