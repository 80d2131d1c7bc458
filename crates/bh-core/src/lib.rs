//! Core allocation engine for billable hour planning.
//!
//! This crate contains the pure calculation logic:
//! - Calendar: workday enumeration with weekends and days off removed
//! - Distribution: proportional monthly split and capped daily expansion
//! - Progress: pacing metrics of logged hours against the plan
//!
//! Everything here is synchronous, deterministic, and free of I/O. The
//! engine validates nothing at runtime; callers run the `validate`
//! functions on user input first. Storage and presentation live in the
//! `bh-db` and `bh-cli` crates.

mod calendar;
mod distribution;
mod plan;
mod progress;
mod validate;

pub use calendar::{
    is_weekend, month_weeks, workday_count_by_month, workday_dates_by_month, workdays_in_year,
};
pub use distribution::{calculate_daily_targets, distribute_hours_by_month};
pub use plan::{PlanConfig, generate_plan, monthly_summary};
pub use progress::{ProgressMetrics, progress_metrics};
pub use validate::{
    ValidationError, validate_goal_hours, validate_logged_hours, validate_max_daily_hours,
    validate_month, validate_target_override, validate_weight, validate_year,
};
