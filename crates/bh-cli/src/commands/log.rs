//! Log command recording billed hours for a day.
//!
//! Re-logging a date replaces its hours. The optional `--target-override`
//! replaces the planned target for that day, whether or not the plan had
//! one.

use std::fmt::Write;

use anyhow::Result;
use bh_core::{is_weekend, validate_logged_hours, validate_target_override};
use bh_db::Database;
use chrono::NaiveDate;

/// Builds the confirmation text for a log entry.
fn format_confirmation(
    date: NaiveDate,
    hours: f64,
    target_override: Option<f64>,
    weekend: bool,
) -> String {
    let mut output = String::new();

    writeln!(output, "Logged {hours}h on {date}.").unwrap();
    if let Some(override_hours) = target_override {
        writeln!(output, "Target for {date} set to {override_hours}h.").unwrap();
    }
    if weekend {
        writeln!(output, "Note: {date} falls on a weekend.").unwrap();
    }

    output
}

/// Runs the log command.
pub fn run(db: &Database, date: NaiveDate, hours: f64, target_override: Option<f64>) -> Result<()> {
    validate_logged_hours(hours)?;
    if let Some(override_hours) = target_override {
        validate_target_override(override_hours)?;
    }

    db.upsert_daily_log(date, hours, target_override)?;
    tracing::debug!(%date, hours, ?target_override, "recorded daily log");

    print!(
        "{}",
        format_confirmation(date, hours, target_override, is_weekend(date))
    );
    Ok(())
}
