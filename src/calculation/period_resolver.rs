//! Reporting period resolution.
//!
//! This module provides [`PeriodResolver`], which finds the reporting period
//! for a date and turns configured [`PeriodDefinition`]s into enriched
//! [`ReportingPeriod`]s whose requirement accounts for weekday holidays.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PeriodDefinition, ReportingPeriod};

use super::WorkdayCalendar;

/// Resolves dates to reporting periods.
///
/// Periods are searched in their configured order. Overlapping periods are
/// allowed; lookups that return a single period return the first match.
///
/// # Example
///
/// ```
/// use rto_engine::calculation::{PeriodResolver, WorkdayCalendar};
/// use rto_engine::models::PeriodDefinition;
/// use chrono::NaiveDate;
///
/// let periods = vec![PeriodDefinition {
///     period_number: 1,
///     start_date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
///     report_date: NaiveDate::from_ymd_opt(2025, 11, 21).unwrap(),
///     baseline_required_days: 20,
/// }];
/// let calendar = WorkdayCalendar::new([NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()]);
/// let resolver = PeriodResolver::new(&periods, &calendar);
///
/// let period = resolver
///     .period_for_date(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
///     .unwrap();
/// assert_eq!(period.effective_required_days(), 19);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver<'a> {
    periods: &'a [PeriodDefinition],
    calendar: &'a WorkdayCalendar,
}

impl<'a> PeriodResolver<'a> {
    /// Creates a resolver over the configured periods.
    pub fn new(periods: &'a [PeriodDefinition], calendar: &'a WorkdayCalendar) -> Self {
        Self { periods, calendar }
    }

    /// Returns the first configured period containing `date`, enriched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoPeriodDefined`] if no period contains the date.
    pub fn period_for_date(&self, date: NaiveDate) -> EngineResult<ReportingPeriod> {
        let definition = self
            .periods
            .iter()
            .find(|p| p.contains_date(date))
            .ok_or(EngineError::NoPeriodDefined { date })?;

        debug!(
            date = %date,
            period_number = definition.period_number,
            "Resolved reporting period"
        );
        Ok(self.enrich_period(definition))
    }

    /// Returns every configured period containing `date`, enriched, in
    /// configured order. Empty when none match.
    pub fn periods_for_date(&self, date: NaiveDate) -> Vec<ReportingPeriod> {
        self.periods
            .iter()
            .filter(|p| p.contains_date(date))
            .map(|p| self.enrich_period(p))
            .collect()
    }

    /// Returns the period containing `today`.
    ///
    /// The caller supplies the date; the resolver never reads the clock.
    pub fn current_period(&self, today: NaiveDate) -> EngineResult<ReportingPeriod> {
        self.period_for_date(today)
    }

    /// Baseline requirement minus weekday exclusions in the period, floored
    /// at zero.
    pub fn effective_required_days(&self, definition: &PeriodDefinition) -> u32 {
        let weekday_exclusions = self
            .calendar
            .weekday_exclusions_in_range(definition.start_date, definition.end_date)
            .len();
        let weekday_exclusions = u32::try_from(weekday_exclusions).unwrap_or(u32::MAX);

        definition
            .baseline_required_days
            .saturating_sub(weekday_exclusions)
    }

    /// Builds the enriched [`ReportingPeriod`] for a configured definition.
    pub fn enrich_period(&self, definition: &PeriodDefinition) -> ReportingPeriod {
        let exclusion_days = self
            .calendar
            .exclusions_in_range(definition.start_date, definition.end_date);
        let effective = self.effective_required_days(definition);

        ReportingPeriod::from_definition(definition, exclusion_days, effective)
    }

    /// Returns the period with the given number, or `None`.
    pub fn period_by_number(&self, period_number: u32) -> Option<ReportingPeriod> {
        self.periods
            .iter()
            .find(|p| p.period_number == period_number)
            .map(|p| self.enrich_period(p))
    }

    /// Returns all periods, enriched, in configured order.
    pub fn all_periods(&self) -> Vec<ReportingPeriod> {
        self.periods.iter().map(|p| self.enrich_period(p)).collect()
    }
}
