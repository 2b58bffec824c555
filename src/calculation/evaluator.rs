//! Compliance evaluation and prediction.
//!
//! This module provides [`ComplianceEvaluator`], which combines an enriched
//! [`ReportingPeriod`] with attendance records to produce a
//! [`ComplianceStatus`], and runs what-if predictions over planned office days.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{AttendanceRecord, AttendanceStatus, ComplianceStatus, ReportingPeriod};

use super::{WorkdayCalendar, classify_risk};

/// Evaluates attendance against a reporting period.
///
/// The evaluator is a pure function of its inputs: the same period, records
/// and date always produce the same [`ComplianceStatus`].
///
/// # Remaining workdays
///
/// `workdays_remaining` counts workdays from `as_of` (or the period start, if
/// later) through the period end. The `as_of` date itself is included unless
/// it already has a record, so a day that has been logged is never counted as
/// still available.
///
/// # Example
///
/// ```
/// use rto_engine::calculation::{ComplianceEvaluator, PeriodResolver, WorkdayCalendar};
/// use rto_engine::models::{AttendanceRecord, ComplianceRisk, PeriodDefinition};
/// use chrono::NaiveDate;
///
/// let periods = vec![PeriodDefinition {
///     period_number: 1,
///     start_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 11, 7).unwrap(),
///     report_date: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
///     baseline_required_days: 3,
/// }];
/// let calendar = WorkdayCalendar::default();
/// let period = PeriodResolver::new(&periods, &calendar).all_periods().remove(0);
///
/// let records = vec![AttendanceRecord::in_office(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap())];
/// let as_of = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
///
/// let status = ComplianceEvaluator::new(&calendar).evaluate(&period, &records, as_of);
/// assert_eq!(status.days_short, 2);
/// assert_eq!(status.workdays_remaining, 4);
/// assert_eq!(status.compliance_risk, ComplianceRisk::Possible);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ComplianceEvaluator<'a> {
    calendar: &'a WorkdayCalendar,
}

impl<'a> ComplianceEvaluator<'a> {
    /// Creates an evaluator using the given calendar.
    pub fn new(calendar: &'a WorkdayCalendar) -> Self {
        Self { calendar }
    }

    /// Evaluates compliance for `period` as of `as_of`.
    ///
    /// Records outside the period are ignored. If `records` holds more than
    /// one record for a date, the last one wins.
    pub fn evaluate(
        &self,
        period: &ReportingPeriod,
        records: &[AttendanceRecord],
        as_of: NaiveDate,
    ) -> ComplianceStatus {
        let recorded = records_in_period(period, records);

        let in_office_count = recorded
            .values()
            .filter(|status| **status == AttendanceStatus::InOffice)
            .count() as u32;
        let required_count = period.effective_required_days();

        let is_compliant = in_office_count >= required_count;
        let days_short = required_count.saturating_sub(in_office_count);
        let days_ahead = in_office_count.saturating_sub(required_count);

        let workdays_remaining = self.workdays_remaining(period, &recorded, as_of);
        let compliance_risk = classify_risk(days_short, workdays_remaining, is_compliant);

        debug!(
            period_number = period.period_number(),
            as_of = %as_of,
            in_office_count,
            required_count,
            workdays_remaining,
            risk = %compliance_risk,
            "Evaluated compliance"
        );

        ComplianceStatus {
            period: period.clone(),
            as_of_date: as_of,
            in_office_count,
            required_count,
            workdays_remaining,
            is_compliant,
            days_short,
            days_ahead,
            is_achievable: days_short <= workdays_remaining,
            compliance_risk,
        }
    }

    /// Planned dates that [`predict`](Self::predict) will count, sorted and
    /// de-duplicated.
    ///
    /// A planned date counts if it is a workday, falls between `as_of` (or the
    /// period start, if later) and the period end, and has no existing record.
    pub fn plannable_dates(
        &self,
        period: &ReportingPeriod,
        actual_records: &[AttendanceRecord],
        planned_in_office: &[NaiveDate],
        as_of: NaiveDate,
    ) -> Vec<NaiveDate> {
        let recorded: HashSet<NaiveDate> = actual_records.iter().map(|r| r.date).collect();
        let window_start = as_of.max(period.start_date());

        planned_in_office
            .iter()
            .copied()
            .filter(|d| *d >= window_start && *d <= period.end_date())
            .filter(|d| self.calendar.is_workday(*d))
            .filter(|d| !recorded.contains(d))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Predicts compliance if the user works in the office on the planned
    /// dates.
    ///
    /// Accepted dates (see [`plannable_dates`](Self::plannable_dates)) are
    /// treated as extra in-office records and [`evaluate`](Self::evaluate) runs
    /// as usual. `actual_records` is not modified.
    pub fn predict(
        &self,
        period: &ReportingPeriod,
        actual_records: &[AttendanceRecord],
        planned_in_office: &[NaiveDate],
        as_of: NaiveDate,
    ) -> ComplianceStatus {
        let accepted = self.plannable_dates(period, actual_records, planned_in_office, as_of);

        let ignored = planned_in_office.len() - accepted.len();
        if ignored > 0 {
            warn!(
                period_number = period.period_number(),
                ignored,
                "Ignoring planned dates that are past, outside the period, non-workdays, duplicated or already recorded"
            );
        }

        let mut combined = actual_records.to_vec();
        combined.extend(accepted.into_iter().map(AttendanceRecord::in_office));

        self.evaluate(period, &combined, as_of)
    }

    fn workdays_remaining(
        &self,
        period: &ReportingPeriod,
        recorded: &BTreeMap<NaiveDate, AttendanceStatus>,
        as_of: NaiveDate,
    ) -> u32 {
        let first = if recorded.contains_key(&as_of) {
            as_of.succ_opt()
        } else {
            Some(as_of)
        };

        match first {
            Some(first) => self
                .calendar
                .count_workdays(first.max(period.start_date()), period.end_date()),
            None => 0,
        }
    }
}

/// Records dated within the period, keyed by date. Later records replace
/// earlier ones for the same date.
fn records_in_period(
    period: &ReportingPeriod,
    records: &[AttendanceRecord],
) -> BTreeMap<NaiveDate, AttendanceStatus> {
    records
        .iter()
        .filter(|r| period.contains_date(r.date))
        .map(|r| (r.date, r.status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::PeriodResolver;
    use crate::models::{ComplianceRisk, PeriodDefinition};
    use proptest::prelude::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn labor_day_calendar() -> WorkdayCalendar {
        WorkdayCalendar::new([make_date("2025-09-01")])
    }

    /// Period 1: 2025-08-15 .. 2025-11-14, baseline 20. With Labor Day
    /// excluded it requires 19 days and contains 65 workdays.
    fn first_period(calendar: &WorkdayCalendar) -> ReportingPeriod {
        let definitions = vec![PeriodDefinition {
            period_number: 1,
            start_date: make_date("2025-08-15"),
            end_date: make_date("2025-11-14"),
            report_date: make_date("2025-11-21"),
            baseline_required_days: 20,
        }];
        PeriodResolver::new(&definitions, calendar).enrich_period(&definitions[0])
    }

    /// The first `count` workdays of the period as in-office records.
    fn in_office_workdays(calendar: &WorkdayCalendar, count: usize) -> Vec<AttendanceRecord> {
        make_date("2025-08-15")
            .iter_days()
            .filter(|d| calendar.is_workday(*d))
            .take(count)
            .map(AttendanceRecord::in_office)
            .collect()
    }

    // ==========================================================================
    // evaluate
    // ==========================================================================
    #[test]
    fn test_fresh_period_is_possible() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);

        let status = evaluator.evaluate(&period, &[], make_date("2025-08-15"));
        assert_eq!(status.required_count, 19);
        assert_eq!(status.in_office_count, 0);
        assert_eq!(status.workdays_remaining, 65);
        assert_eq!(status.days_short, 19);
        assert_eq!(status.compliance_risk, ComplianceRisk::Possible);
        assert!(status.is_achievable);
    }

    #[test]
    fn test_compliant_period_is_achieved_with_days_ahead() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let records = in_office_workdays(&calendar, 21);

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-10-01"));
        assert!(status.is_compliant);
        assert_eq!(status.days_short, 0);
        assert_eq!(status.days_ahead, 2);
        assert_eq!(status.compliance_risk, ComplianceRisk::Achieved);
    }

    #[test]
    fn test_exactly_meeting_requirement_is_compliant() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let records = in_office_workdays(&calendar, 19);

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-10-01"));
        assert!(status.is_compliant);
        assert_eq!(status.days_ahead, 0);
        assert_eq!(status.days_short, 0);
    }

    #[test]
    fn test_last_week_critical() {
        // Mon 2025-11-10 .. Fri 2025-11-14 remain, 5 days short
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let records = in_office_workdays(&calendar, 14);

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-11-10"));
        assert_eq!(status.workdays_remaining, 5);
        assert_eq!(status.days_short, 5);
        assert_eq!(status.compliance_risk, ComplianceRisk::Critical);
    }

    #[test]
    fn test_last_week_impossible() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let records = in_office_workdays(&calendar, 10);

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-11-10"));
        assert_eq!(status.days_short, 9);
        assert_eq!(status.compliance_risk, ComplianceRisk::Impossible);
        assert!(!status.is_achievable);
    }

    #[test]
    fn test_two_weeks_left_at_risk_and_possible() {
        // Mon 2025-11-03 .. Fri 2025-11-14: 10 workdays, threshold 7.5
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);

        let at_risk = evaluator.evaluate(
            &period,
            &in_office_workdays(&calendar, 11),
            make_date("2025-11-03"),
        );
        assert_eq!(at_risk.workdays_remaining, 10);
        assert_eq!(at_risk.days_short, 8);
        assert_eq!(at_risk.compliance_risk, ComplianceRisk::AtRisk);

        let possible = evaluator.evaluate(
            &period,
            &in_office_workdays(&calendar, 12),
            make_date("2025-11-03"),
        );
        assert_eq!(possible.days_short, 7);
        assert_eq!(possible.compliance_risk, ComplianceRisk::Possible);
    }

    #[test]
    fn test_recorded_as_of_date_is_not_remaining() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);
        let as_of = make_date("2025-11-10");

        let unrecorded = evaluator.evaluate(&period, &[], as_of);
        assert_eq!(unrecorded.workdays_remaining, 5);

        let recorded = evaluator.evaluate(&period, &[AttendanceRecord::remote(as_of)], as_of);
        assert_eq!(recorded.workdays_remaining, 4);
    }

    #[test]
    fn test_as_of_after_period_end_has_no_workdays() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let records = in_office_workdays(&calendar, 18);

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-12-01"));
        assert_eq!(status.workdays_remaining, 0);
        assert_eq!(status.days_short, 1);
        assert_eq!(status.compliance_risk, ComplianceRisk::Impossible);
    }

    #[test]
    fn test_as_of_before_period_start_counts_whole_period() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &[], make_date("2025-08-01"));
        assert_eq!(status.workdays_remaining, 65);
    }

    #[test]
    fn test_records_outside_period_are_ignored() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let records = vec![
            AttendanceRecord::in_office(make_date("2025-08-14")),
            AttendanceRecord::in_office(make_date("2025-11-17")),
            AttendanceRecord::in_office(make_date("2025-08-15")),
        ];

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-09-01"));
        assert_eq!(status.in_office_count, 1);
    }

    #[test]
    fn test_remote_records_do_not_count() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let records = vec![
            AttendanceRecord::remote(make_date("2025-08-15")),
            AttendanceRecord::remote(make_date("2025-08-18")),
        ];

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-09-01"));
        assert_eq!(status.in_office_count, 0);
    }

    #[test]
    fn test_later_duplicate_record_replaces_earlier() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let date = make_date("2025-08-18");
        let records = vec![AttendanceRecord::in_office(date), AttendanceRecord::remote(date)];

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &records, make_date("2025-09-01"));
        assert_eq!(status.in_office_count, 0);
    }

    #[test]
    fn test_zero_requirement_is_achieved() {
        let calendar = WorkdayCalendar::default();
        let definitions = vec![PeriodDefinition {
            period_number: 1,
            start_date: make_date("2025-08-15"),
            end_date: make_date("2025-08-20"),
            report_date: make_date("2025-08-20"),
            baseline_required_days: 0,
        }];
        let period = PeriodResolver::new(&definitions, &calendar).enrich_period(&definitions[0]);

        let status =
            ComplianceEvaluator::new(&calendar).evaluate(&period, &[], make_date("2025-08-15"));
        assert!(status.is_compliant);
        assert_eq!(status.compliance_risk, ComplianceRisk::Achieved);
    }

    // ==========================================================================
    // predict
    // ==========================================================================
    #[test]
    fn test_plannable_dates_filters_and_sorts() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);
        let actual = vec![AttendanceRecord::remote(make_date("2025-11-05"))];
        let planned = vec![
            make_date("2025-11-04"),
            make_date("2025-11-03"),
            make_date("2025-11-08"), // Saturday
            make_date("2025-10-30"), // before as_of
            make_date("2025-11-20"), // after period end
            make_date("2025-11-05"), // already recorded
            make_date("2025-11-04"), // duplicate
        ];

        let accepted =
            evaluator.plannable_dates(&period, &actual, &planned, make_date("2025-11-03"));
        assert_eq!(accepted, vec![make_date("2025-11-03"), make_date("2025-11-04")]);
    }

    #[test]
    fn test_plannable_dates_skips_exclusion_days() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);

        let accepted = evaluator.plannable_dates(
            &period,
            &[],
            &[make_date("2025-09-01"), make_date("2025-09-02")],
            make_date("2025-08-25"),
        );
        assert_eq!(accepted, vec![make_date("2025-09-02")]);
    }

    #[test]
    fn test_predict_counts_planned_days() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);
        let actual = in_office_workdays(&calendar, 12);
        let planned = vec![make_date("2025-11-03"), make_date("2025-11-04")];

        let status = evaluator.predict(&period, &actual, &planned, make_date("2025-11-03"));
        assert_eq!(status.in_office_count, 14);
        assert_eq!(status.days_short, 5);
        // 2025-11-03 now has a (planned) record, so counting starts on the 4th
        assert_eq!(status.workdays_remaining, 9);
        assert_eq!(status.compliance_risk, ComplianceRisk::Possible);
    }

    #[test]
    fn test_predict_reaching_requirement_is_achieved() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);
        let actual = in_office_workdays(&calendar, 14);
        let planned: Vec<NaiveDate> = make_date("2025-11-10")
            .iter_days()
            .take(5)
            .collect();

        let status = evaluator.predict(&period, &actual, &planned, make_date("2025-11-10"));
        assert!(status.is_compliant);
        assert_eq!(status.compliance_risk, ComplianceRisk::Achieved);
    }

    #[test]
    fn test_predict_does_not_override_recorded_remote_day() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);
        let date = make_date("2025-11-10");
        let actual = vec![AttendanceRecord::remote(date)];

        let status = evaluator.predict(&period, &actual, &[date], date);
        assert_eq!(status.in_office_count, 0);
        assert_eq!(actual, vec![AttendanceRecord::remote(date)]);
    }

    #[test]
    fn test_predict_without_plan_matches_evaluate() {
        let calendar = labor_day_calendar();
        let period = first_period(&calendar);
        let evaluator = ComplianceEvaluator::new(&calendar);
        let actual = in_office_workdays(&calendar, 9);
        let as_of = make_date("2025-10-20");

        assert_eq!(
            evaluator.predict(&period, &actual, &[], as_of),
            evaluator.evaluate(&period, &actual, as_of)
        );
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_idempotent(
            office_offsets in prop::collection::vec(0i64..92, 0..40),
            as_of_offset in -5i64..100,
        ) {
            let calendar = labor_day_calendar();
            let period = first_period(&calendar);
            let start = make_date("2025-08-15");
            let records: Vec<AttendanceRecord> = office_offsets
                .iter()
                .map(|o| AttendanceRecord::in_office(start + chrono::Duration::days(*o)))
                .collect();
            let as_of = start + chrono::Duration::days(as_of_offset);
            let evaluator = ComplianceEvaluator::new(&calendar);

            let first = evaluator.evaluate(&period, &records, as_of);
            let second = evaluator.evaluate(&period, &records, as_of);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.is_compliant, first.days_short == 0);
            prop_assert!(first.days_short == 0 || first.days_ahead == 0);
        }
    }
}
