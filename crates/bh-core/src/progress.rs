//! Progress metrics over a daily plan.
//!
//! Reconciles logged hours against the generated schedule to answer the
//! questions the dashboard asks: how much is logged, where should I be by
//! now, and what does each remaining day need to carry.

use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::NaiveDate;
use serde::Serialize;

/// Snapshot of progress against the annual goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressMetrics {
    /// Hours logged so far, across all dates.
    pub total_logged: f64,

    /// Planned hours for every target date up to and including today.
    pub target_to_date: f64,

    /// `total_logged - target_to_date`. Negative means behind plan.
    pub pace: f64,

    /// Number of target dates still ahead of today.
    pub remaining_workdays: usize,

    /// `goal_hours - total_logged`.
    pub remaining_target: f64,

    /// Hours per remaining workday needed to land on the goal.
    /// 0.0 when no workdays remain.
    pub recommended_daily: f64,
}

/// Computes progress metrics for a plan against logged hours.
///
/// `today` partitions the plan: target dates at or before it count toward
/// `target_to_date`, later dates form the remaining runway. The caller
/// supplies the reference date, so the computation is deterministic and
/// testable without a clock. Logged hours on dates outside the plan
/// (weekends, days off) still count toward the totals.
#[allow(clippy::cast_precision_loss)]
pub fn progress_metrics(
    goal_hours: f64,
    daily_targets: &BTreeMap<NaiveDate, f64>,
    logged_hours: &BTreeMap<NaiveDate, f64>,
    today: NaiveDate,
) -> ProgressMetrics {
    let total_logged: f64 = logged_hours.values().sum();
    let target_to_date: f64 = daily_targets.range(..=today).map(|(_, hours)| hours).sum();
    let remaining_workdays = daily_targets
        .range((Bound::Excluded(today), Bound::Unbounded))
        .count();

    let remaining_target = goal_hours - total_logged;
    let recommended_daily = if remaining_workdays > 0 {
        remaining_target / remaining_workdays as f64
    } else {
        0.0
    };

    ProgressMetrics {
        total_logged,
        target_to_date,
        pace: total_logged - target_to_date,
        remaining_workdays,
        remaining_target,
        recommended_daily,
    }
}
