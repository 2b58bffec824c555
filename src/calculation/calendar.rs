//! Workday classification and counting.
//!
//! This module provides [`WorkdayCalendar`], which decides whether a date is a
//! weekend, an exclusion day (holiday or shutdown) or a workday, and counts
//! workdays over inclusive date ranges.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Classifies dates against a fixed set of exclusion days.
///
/// The exclusion set is fixed at construction. Membership checks are hash
/// lookups; range queries use a sorted copy of the same dates.
///
/// # Example
///
/// ```
/// use rto_engine::calculation::WorkdayCalendar;
/// use chrono::NaiveDate;
///
/// let labor_day = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let calendar = WorkdayCalendar::new([labor_day]);
///
/// // Friday 2025-08-29 to Tuesday 2025-09-02: Friday and Tuesday only
/// let start = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
/// assert_eq!(calendar.count_workdays(start, end), 2);
/// assert!(!calendar.is_workday(labor_day));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkdayCalendar {
    exclusions: HashSet<NaiveDate>,
    sorted_exclusions: Vec<NaiveDate>,
}

impl WorkdayCalendar {
    /// Creates a calendar from the configured exclusion days.
    ///
    /// Duplicate dates are collapsed.
    pub fn new<I>(exclusion_days: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let exclusions: HashSet<NaiveDate> = exclusion_days.into_iter().collect();
        let mut sorted_exclusions: Vec<NaiveDate> = exclusions.iter().copied().collect();
        sorted_exclusions.sort_unstable();

        Self {
            exclusions,
            sorted_exclusions,
        }
    }

    /// Number of distinct exclusion days configured.
    pub fn exclusion_count(&self) -> usize {
        self.sorted_exclusions.len()
    }

    /// Returns `true` for Saturdays and Sundays.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns `true` if the date is a configured exclusion day, whatever
    /// weekday it falls on.
    pub fn is_exclusion_day(&self, date: NaiveDate) -> bool {
        self.exclusions.contains(&date)
    }

    /// Returns `true` for weekdays that are not exclusion days.
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_exclusion_day(date)
    }

    /// Counts workdays in `[start, end]`, inclusive of both ends.
    ///
    /// Returns 0 when `start > end`.
    ///
    /// Weekends are counted arithmetically from whole weeks plus the leftover
    /// days, then weekday exclusions in the range are subtracted, so the cost
    /// does not grow with the length of the range.
    pub fn count_workdays(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if start > end {
            return 0;
        }

        let total_days = (end - start).num_days() + 1;
        let full_weeks = total_days / 7;
        let leftover = total_days % 7;

        let start_offset = i64::from(start.weekday().num_days_from_monday());
        // Monday = 0, so offsets 5 and 6 are Saturday and Sunday.
        let leftover_weekend = (0..leftover)
            .filter(|i| (start_offset + i) % 7 >= 5)
            .count() as i64;

        let weekdays = total_days - full_weeks * 2 - leftover_weekend;
        let excluded = self.weekday_exclusions_in_range(start, end).len() as i64;

        (weekdays - excluded) as u32
    }

    /// Exclusion days in `[start, end]`, sorted, including weekend dates.
    pub fn exclusions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        self.range_slice(start, end).to_vec()
    }

    /// Exclusion days in `[start, end]` that fall Monday to Friday, sorted.
    ///
    /// Only these reduce a period's requirement; a holiday on a weekend was
    /// never a workday to begin with.
    pub fn weekday_exclusions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        self.range_slice(start, end)
            .iter()
            .copied()
            .filter(|d| !self.is_weekend(*d))
            .collect()
    }

    fn range_slice(&self, start: NaiveDate, end: NaiveDate) -> &[NaiveDate] {
        if start > end {
            return &[];
        }
        let lower = self.sorted_exclusions.partition_point(|d| *d < start);
        let upper = self.sorted_exclusions.partition_point(|d| *d <= end);
        &self.sorted_exclusions[lower..upper]
    }
}
