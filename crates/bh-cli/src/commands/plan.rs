//! Plan command for generating and rendering the yearly schedule.
//!
//! This module implements `bh plan` and also assembles the plan data the
//! status and calendar commands consume: the goal, days off, and monthly
//! weights are loaded from the database, the engine expands them into
//! daily targets, and per-day overrides from the log are applied on top.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write;

use anyhow::{Context, Result};
use bh_core::{
    PlanConfig, generate_plan, monthly_summary, validate_max_daily_hours, validate_year,
};
use bh_db::Database;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::commands::month_abbrev;

/// A year's plan together with the inputs it was built from.
#[derive(Debug)]
pub struct PlanData {
    pub year: i32,
    pub goal_hours: f64,
    pub max_daily_hours: f64,
    pub daily_targets: BTreeMap<NaiveDate, f64>,
}

// ========== Plan Assembly ==========

/// Builds the daily plan for `year` from everything configured in the
/// database. Fails if no goal has been set for the year.
pub fn build_plan(db: &Database, year: i32, plan_config: &PlanConfig) -> Result<PlanData> {
    validate_year(year)?;
    validate_max_daily_hours(plan_config.max_daily_hours)
        .context("invalid max_daily_hours in configuration")?;

    let goal = db.get_goal(year)?.with_context(|| {
        format!("no goal set for {year}; run 'bh setup goal --year {year} --hours <hours>' first")
    })?;

    let days_off: HashSet<NaiveDate> = db
        .list_days_off()?
        .into_iter()
        .map(|day| day.date)
        .collect();
    let weights: HashMap<u32, f64> = db
        .list_monthly_weights(year)?
        .into_iter()
        .map(|weight| (weight.month, weight.weight))
        .collect();

    let mut daily_targets = generate_plan(year, goal.total_hours, &days_off, &weights, plan_config);

    // Per-day overrides from the log replace the generated targets. An
    // override on a non-plan day (e.g. a worked Saturday) adds that day.
    for entry in db.list_daily_logs()? {
        if let Some(override_hours) = entry.target_hours_override {
            if entry.date.year() == year {
                daily_targets.insert(entry.date, override_hours);
            }
        }
    }

    Ok(PlanData {
        year,
        goal_hours: goal.total_hours,
        max_daily_hours: plan_config.max_daily_hours,
        daily_targets,
    })
}

// ========== Human-Readable Output ==========

/// Formats the monthly target table.
pub fn format_plan(data: &PlanData) -> String {
    let mut output = String::new();

    writeln!(output, "BILLABLE PLAN: {}", data.year).unwrap();
    writeln!(
        output,
        "Goal: {}h over {} workdays (ceiling {}h/day)",
        data.goal_hours,
        data.daily_targets.len(),
        data.max_daily_hours
    )
    .unwrap();

    let monthly = monthly_summary(&data.daily_targets);
    let mut day_counts: BTreeMap<u32, usize> = (1..=12).map(|month| (month, 0)).collect();
    for date in data.daily_targets.keys() {
        if let Some(count) = day_counts.get_mut(&date.month()) {
            *count += 1;
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "MONTHLY TARGETS").unwrap();
    writeln!(output, "───────────────").unwrap();
    for (month, hours) in &monthly {
        let days = day_counts.get(month).copied().unwrap_or(0);
        let hours_cell = format!("{hours:.1}h");
        writeln!(
            output,
            "{}  {hours_cell:>8}  {days:>3} days",
            month_abbrev(*month)
        )
        .unwrap();
    }

    let planned: f64 = data.daily_targets.values().sum();
    writeln!(output).unwrap();
    writeln!(output, "Planned total: {planned:.1}h").unwrap();

    let unplaced = data.goal_hours - planned;
    if unplaced > 0.05 {
        writeln!(output).unwrap();
        writeln!(
            output,
            "Hint: {unplaced:.1}h could not be placed under the {}h/day ceiling.",
            data.max_daily_hours
        )
        .unwrap();
    }

    output
}

// ========== JSON Output ==========

/// JSON plan structure.
#[derive(Debug, Serialize)]
pub struct JsonPlan {
    pub year: i32,
    pub goal_hours: f64,
    pub max_daily_hours: f64,
    pub planned_hours: f64,
    pub monthly: Vec<JsonMonthTarget>,
    pub daily: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct JsonMonthTarget {
    pub month: u32,
    pub workdays: usize,
    pub target_hours: f64,
}

/// Formats plan data as JSON.
pub fn format_plan_json(data: &PlanData) -> Result<String> {
    let monthly_hours = monthly_summary(&data.daily_targets);
    let mut day_counts: BTreeMap<u32, usize> = (1..=12).map(|month| (month, 0)).collect();
    for date in data.daily_targets.keys() {
        if let Some(count) = day_counts.get_mut(&date.month()) {
            *count += 1;
        }
    }

    let monthly = (1..=12)
        .map(|month| JsonMonthTarget {
            month,
            workdays: day_counts.get(&month).copied().unwrap_or(0),
            target_hours: monthly_hours.get(&month).copied().unwrap_or(0.0),
        })
        .collect();

    let report = JsonPlan {
        year: data.year,
        goal_hours: data.goal_hours,
        max_daily_hours: data.max_daily_hours,
        planned_hours: data.daily_targets.values().sum(),
        monthly,
        daily: data
            .daily_targets
            .iter()
            .map(|(date, hours)| (date.format("%Y-%m-%d").to_string(), *hours))
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the plan command.
pub fn run(db: &Database, year: i32, json: bool, plan_config: &PlanConfig) -> Result<()> {
    let data = build_plan(db, year, plan_config)?;

    if json {
        println!("{}", format_plan_json(&data)?);
    } else {
        print!("{}", format_plan(&data));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.set_goal(2025, 2000.0).unwrap();
        db.add_day_off(date(2025, 1, 1), "holiday").unwrap();
        db.add_day_off(date(2025, 12, 25), "holiday").unwrap();
        db.set_monthly_weight(2025, 6, 0.8).unwrap();
        db.set_monthly_weight(2025, 12, 1.2).unwrap();
        db
    }

    #[test]
    fn build_plan_fails_without_goal() {
        let db = Database::open_in_memory().unwrap();
        let err = build_plan(&db, 2025, &PlanConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no goal set for 2025"));
    }

    #[test]
    fn build_plan_rejects_out_of_range_year() {
        let db = Database::open_in_memory().unwrap();
        let err = build_plan(&db, 1995, &PlanConfig::default()).unwrap_err();
        assert!(err.to_string().contains("year must be between"));
    }

    #[test]
    fn build_plan_conserves_goal() {
        let db = seeded_db();
        let data = build_plan(&db, 2025, &PlanConfig::default()).unwrap();

        // 261 weekday dates in 2025 minus the two days off.
        assert_eq!(data.daily_targets.len(), 259);
        assert!(!data.daily_targets.contains_key(&date(2025, 1, 1)));
        assert!(!data.daily_targets.contains_key(&date(2025, 12, 25)));

        let planned: f64 = data.daily_targets.values().sum();
        assert!((planned - 2000.0).abs() < 0.5);
    }

    #[test]
    fn overrides_replace_generated_targets() {
        let db = seeded_db();
        db.upsert_daily_log(date(2025, 1, 2), 0.0, Some(4.0))
            .unwrap();
        // A Saturday override adds a day the generator skipped.
        db.upsert_daily_log(date(2025, 1, 4), 0.0, Some(2.0))
            .unwrap();
        // Overrides outside the plan year are ignored.
        db.upsert_daily_log(date(2024, 6, 3), 0.0, Some(5.0))
            .unwrap();

        let data = build_plan(&db, 2025, &PlanConfig::default()).unwrap();
        assert_eq!(data.daily_targets[&date(2025, 1, 2)], 4.0);
        assert_eq!(data.daily_targets[&date(2025, 1, 4)], 2.0);
        assert_eq!(data.daily_targets.len(), 260);
        assert!(!data.daily_targets.contains_key(&date(2024, 6, 3)));
    }

    #[test]
    fn format_plan_lists_every_month() {
        let db = seeded_db();
        let data = build_plan(&db, 2025, &PlanConfig::default()).unwrap();
        let output = format_plan(&data);

        assert!(output.contains("BILLABLE PLAN: 2025"));
        assert!(output.contains("Goal: 2000h over 259 workdays"));
        assert!(output.contains("Jan"));
        assert!(output.contains("Dec"));
        assert!(output.contains("Planned total:"));
        // The default ceiling never clamps this goal, so nothing is dropped.
        assert!(!output.contains("Hint:"));
    }

    #[test]
    fn format_plan_warns_when_hours_cannot_be_placed() {
        let daily_targets: BTreeMap<NaiveDate, f64> =
            (1..=20).map(|day| (date(2025, 1, day), 10.0)).collect();
        let data = PlanData {
            year: 2025,
            goal_hours: 300.0,
            max_daily_hours: 10.0,
            daily_targets,
        };

        let output = format_plan(&data);
        assert!(output.contains("Planned total: 200.0h"));
        assert!(output.contains("Hint: 100.0h could not be placed under the 10h/day ceiling."));
    }

    #[test]
    fn format_plan_json_has_full_month_and_day_detail() {
        let db = seeded_db();
        let data = build_plan(&db, 2025, &PlanConfig::default()).unwrap();
        let output = format_plan_json(&data).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["year"], 2025);
        assert_eq!(value["goal_hours"], 2000.0);
        assert_eq!(value["monthly"].as_array().unwrap().len(), 12);

        let daily = value["daily"].as_object().unwrap();
        assert_eq!(daily.len(), 259);
        assert!(daily.contains_key("2025-01-02"));
        assert!(!daily.contains_key("2025-01-01"));
    }
}
