//! Hour distribution across months and days.
//!
//! Two steps turn an annual goal into per-day targets:
//!
//! 1. Split the total across months in proportion to each month's weighted
//!    workday count.
//! 2. Spread each month's share evenly over its workdays, clamp every day
//!    to the configured ceiling, and pour the clamped overflow into a
//!    year-wide pool that is redistributed in a single ascending pass.
//!
//! All month iteration runs 1 through 12 and all date maps are `BTreeMap`,
//! so identical inputs always fold in the same order and produce identical
//! output.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

/// Distributes total hours across months by weighted workday count.
///
/// A month's weighted count is `workdays * weight`, with a missing weight
/// read as 1.0. Each month then receives `total * weighted / sum(weighted)`.
/// When the weighted sum is zero (a year with no workdays) every month gets
/// 0.0 rather than dividing by zero.
///
/// The result always holds all 12 months.
#[allow(clippy::cast_precision_loss)]
pub fn distribute_hours_by_month(
    total_hours: f64,
    workdays_by_month: &BTreeMap<u32, usize>,
    monthly_weights: &HashMap<u32, f64>,
) -> BTreeMap<u32, f64> {
    let weighted: Vec<f64> = (1..=12u32)
        .map(|month| {
            let weight = monthly_weights.get(&month).copied().unwrap_or(1.0);
            let workdays = workdays_by_month.get(&month).copied().unwrap_or(0);
            workdays as f64 * weight
        })
        .collect();
    let total_weighted: f64 = weighted.iter().sum();

    let mut hours_by_month = BTreeMap::new();
    for (index, month) in (1..=12u32).enumerate() {
        let share = if total_weighted > 0.0 {
            let proportion = weighted[index] / total_weighted;
            total_hours * proportion
        } else {
            0.0
        };
        hours_by_month.insert(month, share);
    }
    hours_by_month
}

/// Expands monthly allocations into per-day targets.
///
/// Each month's hours are divided evenly over its workdays. Days never
/// exceed `max_daily_hours`: a month whose even share is above the ceiling
/// is clamped, and the clamped overflow feeds a year-wide excess pool that
/// [`redistribute_excess`] spreads over days still under the ceiling.
///
/// Months absent from either input, or with no workdays, contribute no
/// days. If every day ends at the ceiling, leftover excess is dropped and
/// the plan totals less than the monthly allocations.
#[allow(clippy::cast_precision_loss)]
pub fn calculate_daily_targets(
    hours_by_month: &BTreeMap<u32, f64>,
    workday_dates_by_month: &BTreeMap<u32, Vec<NaiveDate>>,
    max_daily_hours: f64,
) -> BTreeMap<NaiveDate, f64> {
    let mut daily_targets = BTreeMap::new();
    let mut excess_hours = 0.0;

    // First pass: even share within each month, clamped to the ceiling
    for month in 1..=12u32 {
        let month_hours = hours_by_month.get(&month).copied().unwrap_or(0.0);
        let Some(workdays) = workday_dates_by_month.get(&month) else {
            continue;
        };
        if workdays.is_empty() {
            continue;
        }

        let mut hours_per_day = month_hours / workdays.len() as f64;
        if hours_per_day > max_daily_hours {
            excess_hours += (hours_per_day - max_daily_hours) * workdays.len() as f64;
            hours_per_day = max_daily_hours;
        }
        for day in workdays {
            daily_targets.insert(*day, hours_per_day);
        }
    }

    // Second pass: spread the overflow across days still under the ceiling
    if excess_hours > 0.0 {
        redistribute_excess(&mut daily_targets, excess_hours, max_daily_hours);
    }

    daily_targets
}

/// Single-pass spillover over the whole year, earliest dates first.
///
/// The uniform increment is fixed once, from the first available day's
/// headroom: `min(ceiling - first_day_target, excess / available_days)`.
/// Later days with more headroom are never revisited, so part of the excess
/// can remain unplaced even when room is left. Downstream consumers rely on
/// this exact behavior; do not replace it with an iterative refill.
#[allow(clippy::cast_precision_loss)]
fn redistribute_excess(
    daily_targets: &mut BTreeMap<NaiveDate, f64>,
    mut excess_hours: f64,
    max_daily_hours: f64,
) {
    // BTreeMap iteration is date-ascending, so earlier days come first
    let available_days: Vec<NaiveDate> = daily_targets
        .iter()
        .filter(|(_, hours)| **hours < max_daily_hours)
        .map(|(day, _)| *day)
        .collect();

    let Some(first_day) = available_days.first() else {
        tracing::debug!(excess_hours, "every day at ceiling, excess dropped");
        return;
    };

    let first_headroom = max_daily_hours - daily_targets.get(first_day).copied().unwrap_or(0.0);
    let additional_per_day = first_headroom.min(excess_hours / available_days.len() as f64);

    for day in available_days {
        let current = daily_targets.get(&day).copied().unwrap_or(0.0);
        let new_target = (current + additional_per_day).min(max_daily_hours);
        daily_targets.insert(day, new_target);
        excess_hours -= new_target - current;

        if excess_hours <= 0.0 {
            break;
        }
    }

    if excess_hours > 0.0 {
        tracing::debug!(excess_hours, "excess left after redistribution pass");
    }
}
