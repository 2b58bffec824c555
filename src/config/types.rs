//! Configuration types for compliance evaluation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the assembled
//! [`ComplianceConfig`] handed to the rest of the engine.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::WorkdayCalendar;
use crate::models::PeriodDefinition;

/// Attendance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Baseline in-office days required in every reporting period.
    pub required_days_per_period: u32,
}

/// Where attendance data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding the yearly attendance files. Relative paths are
    /// resolved against the configuration directory.
    pub attendance_data_dir: PathBuf,
}

/// Contents of `settings.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Policy section.
    pub policy: PolicySettings,
    /// Data section.
    pub data: DataSettings,
}

/// One entry of `periods.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeriodEntry {
    /// Unique, positive period number.
    pub period_number: u32,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Reporting deadline.
    pub report_date: NaiveDate,
}

/// Contents of `periods.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsFile {
    /// Period definitions in configured order.
    pub periods: Vec<PeriodEntry>,
}

/// One entry of `holidays.yaml`: a bare date or a named date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HolidayEntry {
    /// A date without a name, e.g. `- 2025-09-01`.
    Date(NaiveDate),
    /// A date in map form, e.g. `- { date: 2025-12-25, name: Christmas Day }`.
    /// The name may be left out.
    Named {
        /// The holiday date.
        date: NaiveDate,
        /// The holiday name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl HolidayEntry {
    /// The holiday date.
    pub fn date(&self) -> NaiveDate {
        match self {
            HolidayEntry::Date(date) => *date,
            HolidayEntry::Named { date, .. } => *date,
        }
    }

    /// The holiday name, if one was configured.
    pub fn name(&self) -> Option<&str> {
        match self {
            HolidayEntry::Date(_) => None,
            HolidayEntry::Named { name, .. } => name.as_deref(),
        }
    }
}

/// Contents of `holidays.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// Exclusion days.
    pub holidays: Vec<HolidayEntry>,
}

/// The complete, validated configuration.
///
/// Built once at startup and never modified; the engine components borrow
/// from it.
#[derive(Debug, Clone)]
pub struct ComplianceConfig {
    settings: Settings,
    periods: Vec<PeriodDefinition>,
    holidays: Vec<HolidayEntry>,
    attendance_dir: PathBuf,
}

impl ComplianceConfig {
    /// Assembles a configuration from validated parts.
    ///
    /// Each period receives the policy's baseline requirement. A relative
    /// attendance directory is resolved against `base_dir`.
    pub fn new(
        settings: Settings,
        periods: Vec<PeriodEntry>,
        holidays: Vec<HolidayEntry>,
        base_dir: &Path,
    ) -> Self {
        let baseline = settings.policy.required_days_per_period;
        let periods = periods
            .into_iter()
            .map(|entry| PeriodDefinition {
                period_number: entry.period_number,
                start_date: entry.start_date,
                end_date: entry.end_date,
                report_date: entry.report_date,
                baseline_required_days: baseline,
            })
            .collect();

        let data_dir = &settings.data.attendance_data_dir;
        let attendance_dir = if data_dir.is_absolute() {
            data_dir.clone()
        } else {
            base_dir.join(data_dir)
        };

        Self {
            settings,
            periods,
            holidays,
            attendance_dir,
        }
    }

    /// Returns the settings as loaded.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the period definitions in configured order.
    pub fn periods(&self) -> &[PeriodDefinition] {
        &self.periods
    }

    /// Returns the holiday entries as configured.
    pub fn holidays(&self) -> &[HolidayEntry] {
        &self.holidays
    }

    /// Returns the configured exclusion dates.
    pub fn exclusion_days(&self) -> Vec<NaiveDate> {
        self.holidays.iter().map(HolidayEntry::date).collect()
    }

    /// Builds the workday calendar for the configured exclusion days.
    pub fn calendar(&self) -> WorkdayCalendar {
        WorkdayCalendar::new(self.holidays.iter().map(HolidayEntry::date))
    }

    /// Returns the resolved attendance data directory.
    pub fn attendance_dir(&self) -> &Path {
        &self.attendance_dir
    }
}
