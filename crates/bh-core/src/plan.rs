//! Plan generation facade.
//!
//! Ties the calendar and distribution steps together into the one call the
//! outer layers use, plus the monthly roll-up used for summary tables.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};

use crate::calendar::{workday_count_by_month, workday_dates_by_month};
use crate::distribution::{calculate_daily_targets, distribute_hours_by_month};

/// Configuration for plan generation.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Ceiling for any single day's target hours.
    /// Default: 10.0.
    pub max_daily_hours: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_daily_hours: 10.0,
        }
    }
}

/// Generates the per-day target schedule for a year.
///
/// Workdays are enumerated with weekends and `days_off` removed, the annual
/// total is split across months by weighted workday count, and each month's
/// share is expanded into daily targets under the configured ceiling.
///
/// # Arguments
///
/// * `year` - Calendar year to plan
/// * `total_hours` - Annual billable hour goal
/// * `days_off` - Dates excluded from the workday calendar
/// * `monthly_weights` - Per-month multipliers; missing months count as 1.0
/// * `config` - Plan configuration (daily ceiling)
///
/// # Returns
///
/// Target hours per workday, keyed by date in ascending order. Weekends and
/// excluded dates never appear.
pub fn generate_plan(
    year: i32,
    total_hours: f64,
    days_off: &HashSet<NaiveDate>,
    monthly_weights: &HashMap<u32, f64>,
    config: &PlanConfig,
) -> BTreeMap<NaiveDate, f64> {
    let workdays_by_month = workday_count_by_month(year, days_off);
    let dates_by_month = workday_dates_by_month(year, days_off);

    let hours_by_month =
        distribute_hours_by_month(total_hours, &workdays_by_month, monthly_weights);
    let targets =
        calculate_daily_targets(&hours_by_month, &dates_by_month, config.max_daily_hours);

    tracing::debug!(
        year,
        total_hours,
        planned_days = targets.len(),
        planned_hours = targets.values().sum::<f64>(),
        "generated daily plan"
    );
    targets
}

/// Sums a per-day hour map into monthly totals.
///
/// Works over any date-keyed hour map, planned targets and logged hours
/// alike. All 12 months are present, zero-filled; days fold in ascending
/// date order.
pub fn monthly_summary(daily_hours: &BTreeMap<NaiveDate, f64>) -> BTreeMap<u32, f64> {
    let mut totals: BTreeMap<u32, f64> = (1..=12).map(|month| (month, 0.0)).collect();
    for (day, hours) in daily_hours {
        if let Some(total) = totals.get_mut(&day.month()) {
            *total += hours;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::is_weekend;

    const TOLERANCE: f64 = 1e-9;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn scenario_days_off() -> HashSet<NaiveDate> {
        [date(2025, 1, 1), date(2025, 12, 25)].into()
    }

    fn scenario_weights() -> HashMap<u32, f64> {
        HashMap::from([(6, 0.8), (12, 1.2)])
    }

    #[test]
    fn plan_skips_weekends_and_days_off() {
        let days_off = scenario_days_off();
        let plan = generate_plan(
            2025,
            2000.0,
            &days_off,
            &scenario_weights(),
            &PlanConfig::default(),
        );

        for day in plan.keys() {
            assert!(!is_weekend(*day));
            assert!(!days_off.contains(day));
        }
        assert!(plan.contains_key(&date(2025, 1, 2)));
        assert_eq!(plan.len(), 259);
    }

    #[test]
    fn plan_respects_ceiling_and_conserves_total() {
        let plan = generate_plan(
            2025,
            2000.0,
            &scenario_days_off(),
            &scenario_weights(),
            &PlanConfig::default(),
        );

        for hours in plan.values() {
            assert!(*hours <= 10.0 + TOLERANCE);
        }
        let planned: f64 = plan.values().sum();
        assert!((planned - 2000.0).abs() < 0.5);
    }

    #[test]
    fn tight_ceiling_still_conserves_via_spillover() {
        // With an 8.0 ceiling the December share overflows; the excess fits
        // comfortably in the rest of the year so the total survives
        let plan = generate_plan(
            2025,
            2000.0,
            &scenario_days_off(),
            &scenario_weights(),
            &PlanConfig {
                max_daily_hours: 8.0,
            },
        );

        for hours in plan.values() {
            assert!(*hours <= 8.0 + TOLERANCE);
        }
        let planned: f64 = plan.values().sum();
        assert!((planned - 2000.0).abs() < 0.5);
    }

    #[test]
    fn zero_goal_produces_zero_targets() {
        let plan = generate_plan(
            2025,
            0.0,
            &HashSet::new(),
            &HashMap::new(),
            &PlanConfig::default(),
        );

        assert_eq!(plan.len(), 261);
        assert!(plan.values().all(|hours| *hours == 0.0));
    }

    #[test]
    fn monthly_summary_groups_by_month() {
        let targets = BTreeMap::from([
            (date(2025, 1, 5), 5.0),
            (date(2025, 1, 6), 6.0),
            (date(2025, 2, 3), 7.0),
            (date(2025, 2, 4), 8.0),
        ]);

        let summary = monthly_summary(&targets);

        assert_eq!(summary.len(), 12);
        assert!((summary[&1] - 11.0).abs() < TOLERANCE);
        assert!((summary[&2] - 15.0).abs() < TOLERANCE);
        assert!(summary[&3].abs() < TOLERANCE);
    }

    #[test]
    fn monthly_summary_accepts_any_dates() {
        // Logged hours can land on weekends; the fold does not care
        let logged = BTreeMap::from([
            (date(2025, 3, 1), 4.0), // a Saturday
            (date(2025, 3, 3), 8.0),
        ]);

        let summary = monthly_summary(&logged);
        assert!((summary[&3] - 12.0).abs() < TOLERANCE);
    }
}
