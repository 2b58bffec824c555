//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading compliance
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::PeriodDefinition;

use super::types::{ComplianceConfig, HolidaysFile, PeriodEntry, PeriodsFile, Settings};

/// Loads and provides access to compliance configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them and assembles an immutable [`ComplianceConfig`].
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── settings.yaml   # Policy requirement and attendance data directory
/// ├── periods.yaml    # Reporting period definitions
/// └── holidays.yaml   # Exclusion days (holidays, shutdowns)
/// ```
///
/// # Example
///
/// ```no_run
/// use rto_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Periods configured: {}", loader.config().periods().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ComplianceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if any file is missing
    /// - [`EngineError::ConfigParseError`] if any file contains invalid YAML
    ///   or is missing a required field
    /// - [`EngineError::InvalidConfig`] if values fail validation
    ///
    /// Overlapping periods are accepted but logged as a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        validate_settings(&settings)?;

        let periods = Self::load_yaml::<PeriodsFile>(&path.join("periods.yaml"))?.periods;
        validate_periods(&periods)?;

        let holidays = Self::load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?.holidays;

        let config = ComplianceConfig::new(settings, periods, holidays, path);
        warn_on_overlaps(config.periods());

        info!(
            config_dir = %path.display(),
            periods = config.periods().len(),
            exclusion_days = config.holidays().len(),
            required_days = config.settings().policy.required_days_per_period,
            "Loaded configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ComplianceConfig {
        self.config
    }
}

fn validate_settings(settings: &Settings) -> EngineResult<()> {
    if settings.policy.required_days_per_period == 0 {
        return Err(EngineError::InvalidConfig {
            field: "policy.required_days_per_period".to_string(),
            message: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

fn validate_periods(periods: &[PeriodEntry]) -> EngineResult<()> {
    if periods.is_empty() {
        return Err(EngineError::InvalidConfig {
            field: "periods".to_string(),
            message: "at least one reporting period must be defined".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (index, period) in periods.iter().enumerate() {
        if period.period_number == 0 {
            return Err(EngineError::InvalidConfig {
                field: format!("periods[{}].period_number", index),
                message: "must be greater than 0".to_string(),
            });
        }
        if period.end_date < period.start_date {
            return Err(EngineError::InvalidConfig {
                field: format!("periods[{}].end_date", index),
                message: format!(
                    "end_date {} is before start_date {}",
                    period.end_date, period.start_date
                ),
            });
        }
        if !seen.insert(period.period_number) {
            return Err(EngineError::InvalidConfig {
                field: format!("periods[{}].period_number", index),
                message: format!("duplicate period number {}", period.period_number),
            });
        }
    }
    Ok(())
}

fn warn_on_overlaps(periods: &[PeriodDefinition]) {
    for (i, first) in periods.iter().enumerate() {
        for second in &periods[i + 1..] {
            if first.overlaps(second) {
                warn!(
                    first = first.period_number,
                    second = second.period_number,
                    "Reporting periods overlap; date lookups use the first configured period"
                );
            }
        }
    }
}
