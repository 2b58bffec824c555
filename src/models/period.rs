//! Reporting period models.
//!
//! A [`PeriodDefinition`] is a period as configured: dates plus the baseline
//! requirement. A [`ReportingPeriod`] is the same period after enrichment with
//! its exclusion days and effective requirement. Only
//! [`PeriodResolver`](crate::calculation::PeriodResolver) can build a
//! `ReportingPeriod`, so compliance evaluation never sees a period whose
//! requirement has not been adjusted for holidays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A reporting period exactly as configured.
///
/// # Example
///
/// ```
/// use rto_engine::models::PeriodDefinition;
/// use chrono::NaiveDate;
///
/// let definition = PeriodDefinition {
///     period_number: 1,
///     start_date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
///     report_date: NaiveDate::from_ymd_opt(2025, 11, 21).unwrap(),
///     baseline_required_days: 20,
/// };
///
/// assert!(definition.contains_date(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()));
/// assert!(!definition.contains_date(NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDefinition {
    /// Unique, positive identifier of the period.
    pub period_number: u32,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Date by which compliance must be reported. May fall after `end_date`.
    pub report_date: NaiveDate,
    /// In-office days required before holiday adjustment.
    pub baseline_required_days: u32,
}

impl PeriodDefinition {
    /// Checks if a date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks whether two periods share at least one date.
    pub fn overlaps(&self, other: &PeriodDefinition) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

/// A reporting period enriched with its holiday adjustments.
///
/// Fields are read through accessors; the type cannot be built or deserialized
/// outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportingPeriod {
    period_number: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    report_date: NaiveDate,
    baseline_required_days: u32,
    exclusion_days: Vec<NaiveDate>,
    effective_required_days: u32,
}

impl ReportingPeriod {
    pub(crate) fn from_definition(
        definition: &PeriodDefinition,
        exclusion_days: Vec<NaiveDate>,
        effective_required_days: u32,
    ) -> Self {
        Self {
            period_number: definition.period_number,
            start_date: definition.start_date,
            end_date: definition.end_date,
            report_date: definition.report_date,
            baseline_required_days: definition.baseline_required_days,
            exclusion_days,
            effective_required_days,
        }
    }

    /// Unique identifier of the period.
    pub fn period_number(&self) -> u32 {
        self.period_number
    }

    /// First day of the period (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the period (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Reporting deadline.
    pub fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    /// Requirement before holiday adjustment.
    pub fn baseline_required_days(&self) -> u32 {
        self.baseline_required_days
    }

    /// Configured exclusion days within the period, sorted, including any
    /// that fall on a weekend.
    pub fn exclusion_days(&self) -> &[NaiveDate] {
        &self.exclusion_days
    }

    /// Requirement after subtracting weekday exclusions, never negative.
    pub fn effective_required_days(&self) -> u32 {
        self.effective_required_days
    }

    /// Checks if a date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
