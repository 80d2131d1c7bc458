//! Workday calendar arithmetic.
//!
//! A workday is any date that is neither a Saturday/Sunday nor in the
//! caller's day-off set. All functions walk the proleptic Gregorian
//! calendar via `chrono` and return date-ascending collections.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns true if the date falls on a Saturday or Sunday.
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// All working days in a year, ascending.
///
/// A date counts as a workday if it is not a weekend and not in `days_off`.
/// Dates in `days_off` that fall outside the year or on a weekend have no
/// effect. Years chrono cannot represent yield an empty list.
pub fn workdays_in_year(year: i32, days_off: &HashSet<NaiveDate>) -> Vec<NaiveDate> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_weekend(*day) && !days_off.contains(day))
        .collect()
}

/// Number of workdays per month. All 12 months are present, zero-filled.
pub fn workday_count_by_month(year: i32, days_off: &HashSet<NaiveDate>) -> BTreeMap<u32, usize> {
    let mut counts: BTreeMap<u32, usize> = (1..=12).map(|month| (month, 0)).collect();
    for day in workdays_in_year(year, days_off) {
        if let Some(count) = counts.get_mut(&day.month()) {
            *count += 1;
        }
    }
    counts
}

/// Workday dates grouped by month, ascending within each month.
/// All 12 months are present; months with no workdays map to an empty list.
pub fn workday_dates_by_month(
    year: i32,
    days_off: &HashSet<NaiveDate>,
) -> BTreeMap<u32, Vec<NaiveDate>> {
    let mut dates: BTreeMap<u32, Vec<NaiveDate>> =
        (1..=12).map(|month| (month, Vec::new())).collect();
    for day in workdays_in_year(year, days_off) {
        if let Some(days) = dates.get_mut(&day.month()) {
            days.push(day);
        }
    }
    dates
}

/// Monday-first week rows for a month's calendar grid.
///
/// Cells before the first and after the last day of the month are `None`,
/// matching the usual wall-calendar layout. An invalid year/month
/// combination yields no rows.
pub fn month_weeks(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    for day in first.iter_days().take_while(|day| day.month() == month) {
        let slot = day.weekday().num_days_from_monday() as usize;
        week[slot] = Some(day);
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn weekend_detection() {
        // 2025-04-07 is a Monday, 04-12 a Saturday, 04-13 a Sunday
        assert!(!is_weekend(date(2025, 4, 7)));
        assert!(is_weekend(date(2025, 4, 12)));
        assert!(is_weekend(date(2025, 4, 13)));
    }

    #[test]
    fn january_2025_has_23_workdays() {
        let workdays = workdays_in_year(2025, &HashSet::new());
        let january: Vec<_> = workdays.iter().filter(|day| day.month() == 1).collect();
        assert_eq!(january.len(), 23);
    }

    #[test]
    fn full_year_workday_totals() {
        // 2025 starts on a Wednesday: 52 weeks plus one extra weekday
        assert_eq!(workdays_in_year(2025, &HashSet::new()).len(), 261);
        // 2024 is a leap year starting on a Monday: two extra weekdays
        assert_eq!(workdays_in_year(2024, &HashSet::new()).len(), 262);
    }

    #[test]
    fn days_off_are_excluded() {
        let days_off: HashSet<NaiveDate> = [date(2025, 1, 1), date(2025, 1, 20)].into();
        let workdays = workdays_in_year(2025, &days_off);

        assert!(!workdays.contains(&date(2025, 1, 1)));
        assert!(!workdays.contains(&date(2025, 1, 20)));

        let january = workdays.iter().filter(|day| day.month() == 1).count();
        assert_eq!(january, 21);
    }

    #[test]
    fn weekend_day_off_changes_nothing() {
        // 2025-01-04 is a Saturday, already excluded by the weekend rule
        let days_off: HashSet<NaiveDate> = [date(2025, 1, 4)].into();
        let workdays = workdays_in_year(2025, &days_off);
        assert_eq!(workdays.len(), 261);
    }

    #[test]
    fn workdays_are_ascending() {
        let workdays = workdays_in_year(2025, &HashSet::new());
        assert!(workdays.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn count_by_month_is_zero_filled() {
        let counts = workday_count_by_month(2025, &HashSet::new());
        assert_eq!(counts.len(), 12);
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());
        assert_eq!(counts[&1], 23);
        assert_eq!(counts.values().sum::<usize>(), 261);
    }

    #[test]
    fn dates_by_month_groups_and_sorts() {
        let dates = workday_dates_by_month(2025, &HashSet::new());
        assert_eq!(dates.len(), 12);

        let february = &dates[&2];
        assert!(february.iter().all(|day| day.month() == 2));
        assert!(february.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(february.len(), 20);
    }

    #[test]
    fn month_weeks_april_2025() {
        // April 2025 starts on a Tuesday and ends on a Wednesday
        let weeks = month_weeks(2025, 4);
        assert_eq!(weeks.len(), 5);

        assert_eq!(weeks[0][0], None);
        assert_eq!(weeks[0][1], Some(date(2025, 4, 1)));
        assert_eq!(weeks[0][6], Some(date(2025, 4, 6)));

        let last = weeks[4];
        assert_eq!(last[2], Some(date(2025, 4, 30)));
        assert!(last[3..].iter().all(Option::is_none));
    }

    #[test]
    fn month_weeks_exact_fit() {
        // February 2021 starts on a Monday and spans exactly four weeks
        let weeks = month_weeks(2021, 2);
        assert_eq!(weeks.len(), 4);
        assert!(weeks.iter().flatten().all(Option::is_some));
        assert_eq!(weeks[0][0], Some(date(2021, 2, 1)));
        assert_eq!(weeks[3][6], Some(date(2021, 2, 28)));
    }

    #[test]
    fn month_weeks_invalid_month_is_empty() {
        assert!(month_weeks(2025, 13).is_empty());
        assert!(month_weeks(2025, 0).is_empty());
    }
}
