//! Status command showing progress against the plan.
//!
//! This module implements `bh status`: progress metrics plus a
//! month-by-month target/logged table, with optional JSON output and a
//! `--today` override for reproducible runs.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;
use bh_core::{PlanConfig, ProgressMetrics, monthly_summary, progress_metrics};
use bh_db::Database;
use chrono::NaiveDate;
use serde::Serialize;

use crate::commands::month_abbrev;
use crate::commands::plan::build_plan;

/// Computed status data.
#[derive(Debug)]
pub struct StatusData {
    pub year: i32,
    pub today: NaiveDate,
    pub goal_hours: f64,
    pub metrics: ProgressMetrics,
    pub monthly_targets: BTreeMap<u32, f64>,
    pub monthly_logged: BTreeMap<u32, f64>,
}

// ========== Status Generation ==========

/// Generates status data from the database.
pub fn generate_status_data(
    db: &Database,
    year: i32,
    today: NaiveDate,
    plan_config: &PlanConfig,
) -> Result<StatusData> {
    let plan = build_plan(db, year, plan_config)?;

    // Every logged day counts toward progress, on plan or off it.
    let logged: BTreeMap<NaiveDate, f64> = db
        .list_daily_logs()?
        .into_iter()
        .map(|entry| (entry.date, entry.hours_billed))
        .collect();

    let metrics = progress_metrics(plan.goal_hours, &plan.daily_targets, &logged, today);
    let monthly_targets = monthly_summary(&plan.daily_targets);
    let monthly_logged = monthly_summary(&logged);

    Ok(StatusData {
        year,
        today,
        goal_hours: plan.goal_hours,
        metrics,
        monthly_targets,
        monthly_logged,
    })
}

/// Describes which side of the plan the pace value falls on.
fn pace_label(pace: f64) -> &'static str {
    if pace > 0.0 {
        "ahead of plan"
    } else if pace < 0.0 {
        "behind plan"
    } else {
        "on plan"
    }
}

/// Generates a 10-character progress bar.
/// Values below 5% of max get a single block for visibility.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn progress_bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = (value / max).clamp(0.0, 1.0);
    let filled = if ratio > 0.0 && ratio < 0.05 {
        1
    } else {
        (ratio * 10.0).round() as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

// ========== Human-Readable Output ==========

/// Formats the status output.
pub fn format_status(data: &StatusData) -> String {
    let mut output = String::new();

    writeln!(output, "STATUS: {} (as of {})", data.year, data.today).unwrap();
    writeln!(output, "Goal: {}h", data.goal_hours).unwrap();

    let metrics = &data.metrics;
    writeln!(output).unwrap();
    writeln!(output, "PROGRESS").unwrap();
    writeln!(output, "────────").unwrap();
    let bar = progress_bar(metrics.total_logged, data.goal_hours);
    let percent = if data.goal_hours > 0.0 {
        metrics.total_logged / data.goal_hours * 100.0
    } else {
        0.0
    };
    writeln!(output, "Year:             {bar} {percent:.0}%").unwrap();
    writeln!(output, "Logged to date:   {:.1}h", metrics.total_logged).unwrap();
    writeln!(output, "Target to date:   {:.1}h", metrics.target_to_date).unwrap();
    writeln!(
        output,
        "Pace:             {:+.1}h ({})",
        metrics.pace,
        pace_label(metrics.pace)
    )
    .unwrap();
    writeln!(output, "Remaining target: {:.1}h", metrics.remaining_target).unwrap();
    writeln!(output, "Remaining days:   {}", metrics.remaining_workdays).unwrap();
    writeln!(output, "Recommended:      {:.1}h/day", metrics.recommended_daily).unwrap();

    writeln!(output).unwrap();
    writeln!(output, "BY MONTH").unwrap();
    writeln!(output, "────────").unwrap();
    writeln!(output, "     {:>8}  {:>8}", "Target", "Logged").unwrap();
    for month in 1..=12 {
        let target = data.monthly_targets.get(&month).copied().unwrap_or(0.0);
        let logged = data.monthly_logged.get(&month).copied().unwrap_or(0.0);
        let target_cell = format!("{target:.1}h");
        let logged_cell = format!("{logged:.1}h");
        writeln!(
            output,
            "{}  {target_cell:>8}  {logged_cell:>8}",
            month_abbrev(month)
        )
        .unwrap();
    }

    output
}

// ========== JSON Output ==========

/// JSON status structure.
#[derive(Debug, Serialize)]
pub struct JsonStatus {
    pub year: i32,
    pub today: String,
    pub goal_hours: f64,
    pub metrics: ProgressMetrics,
    pub monthly: Vec<JsonMonthProgress>,
}

#[derive(Debug, Serialize)]
pub struct JsonMonthProgress {
    pub month: u32,
    pub target_hours: f64,
    pub logged_hours: f64,
}

/// Formats status data as JSON.
pub fn format_status_json(data: &StatusData) -> Result<String> {
    let monthly = (1..=12)
        .map(|month| JsonMonthProgress {
            month,
            target_hours: data.monthly_targets.get(&month).copied().unwrap_or(0.0),
            logged_hours: data.monthly_logged.get(&month).copied().unwrap_or(0.0),
        })
        .collect();

    let report = JsonStatus {
        year: data.year,
        today: data.today.to_string(),
        goal_hours: data.goal_hours,
        metrics: data.metrics.clone(),
        monthly,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the status command.
pub fn run(
    db: &Database,
    year: i32,
    json: bool,
    today: NaiveDate,
    plan_config: &PlanConfig,
) -> Result<()> {
    let data = generate_status_data(db, year, today, plan_config)?;

    if json {
        println!("{}", format_status_json(&data)?);
    } else {
        print!("{}", format_status(&data));
    }

    Ok(())
}
