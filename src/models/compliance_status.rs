//! Compliance result models.
//!
//! This module contains the [`ComplianceStatus`] snapshot produced by every
//! evaluation and the [`ComplianceRisk`] classification it carries.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::ReportingPeriod;

/// How attainable the remaining requirement is.
///
/// # Example
///
/// ```
/// use rto_engine::models::ComplianceRisk;
///
/// assert_eq!(ComplianceRisk::AtRisk.to_string(), "at-risk");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceRisk {
    /// The requirement is already met.
    Achieved,
    /// The requirement can be met with reasonable attendance.
    Possible,
    /// More than 75% of the remaining workdays must be spent in the office.
    AtRisk,
    /// Every remaining workday must be spent in the office.
    Critical,
    /// The requirement cannot be met even with full attendance.
    Impossible,
}

impl ComplianceRisk {
    /// Returns the kebab-case label used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceRisk::Achieved => "achieved",
            ComplianceRisk::Possible => "possible",
            ComplianceRisk::AtRisk => "at-risk",
            ComplianceRisk::Critical => "critical",
            ComplianceRisk::Impossible => "impossible",
        }
    }
}

impl fmt::Display for ComplianceRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The compliance state of one period as of one date.
///
/// Produced fresh by every call to
/// [`ComplianceEvaluator::evaluate`](crate::calculation::ComplianceEvaluator::evaluate)
/// or [`predict`](crate::calculation::ComplianceEvaluator::predict); never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceStatus {
    /// The period that was evaluated.
    pub period: ReportingPeriod,
    /// The date the evaluation was made as of.
    pub as_of_date: NaiveDate,
    /// In-office records dated within the period.
    pub in_office_count: u32,
    /// The period's effective required days.
    pub required_count: u32,
    /// Workdays still available in the period.
    pub workdays_remaining: u32,
    /// `in_office_count >= required_count`.
    pub is_compliant: bool,
    /// In-office days still needed, zero once compliant.
    pub days_short: u32,
    /// In-office days beyond the requirement, zero until compliant.
    pub days_ahead: u32,
    /// `days_short <= workdays_remaining`.
    pub is_achievable: bool,
    /// Risk classification.
    pub compliance_risk: ComplianceRisk,
}

impl ComplianceStatus {
    /// Percentage of the remaining workdays that must be spent in the office.
    ///
    /// Returns `None` when no workdays remain.
    ///
    /// # Example
    ///
    /// ```
    /// use rto_engine::calculation::{ComplianceEvaluator, PeriodResolver, WorkdayCalendar};
    /// use rto_engine::models::PeriodDefinition;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// // Monday 3 to Wednesday 12 November: 8 workdays
    /// let start = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
    /// let periods = vec![PeriodDefinition {
    ///     period_number: 1,
    ///     start_date: start,
    ///     end_date: NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(),
    ///     report_date: NaiveDate::from_ymd_opt(2025, 11, 19).unwrap(),
    ///     baseline_required_days: 6,
    /// }];
    /// let calendar = WorkdayCalendar::default();
    /// let period = PeriodResolver::new(&periods, &calendar)
    ///     .period_by_number(1)
    ///     .unwrap();
    ///
    /// let status = ComplianceEvaluator::new(&calendar).evaluate(&period, &[], start);
    /// assert_eq!(status.days_short, 6);
    /// assert_eq!(status.workdays_remaining, 8);
    /// assert_eq!(status.required_attendance_rate(), Some(Decimal::from(75)));
    /// ```
    pub fn required_attendance_rate(&self) -> Option<Decimal> {
        if self.workdays_remaining == 0 {
            return None;
        }
        Some(
            Decimal::from(self.days_short) * Decimal::ONE_HUNDRED
                / Decimal::from(self.workdays_remaining),
        )
    }
}
