//! Setup commands configuring the goal, days off, and monthly weights.
//!
//! Each subcommand is one step of the setup flow. Every step writes
//! straight to the database, so steps can run in any order and be re-run
//! to correct earlier input.

use std::fmt::Write;

use anyhow::Result;
use bh_core::{validate_goal_hours, validate_month, validate_weight, validate_year};
use bh_db::{Database, DayOffRecord, MonthlyWeightRecord};
use chrono::NaiveDate;

use crate::commands::month_abbrev;

/// Sets the total billable hours goal for a year.
pub fn set_goal(db: &Database, year: i32, hours: f64) -> Result<()> {
    validate_year(year)?;
    validate_goal_hours(hours)?;
    db.set_goal(year, hours)?;
    println!("Goal for {year} set to {hours}h.");
    Ok(())
}

/// Marks a date as a day off.
pub fn add_day_off(db: &Database, date: NaiveDate, kind: &str) -> Result<()> {
    db.add_day_off(date, kind)?;
    println!("Marked {date} as a day off ({kind}).");
    Ok(())
}

/// Unmarks a day off.
pub fn remove_day_off(db: &Database, date: NaiveDate) -> Result<()> {
    if db.remove_day_off(date)? {
        println!("Removed day off {date}.");
    } else {
        println!("{date} was not marked as a day off.");
    }
    Ok(())
}

/// Formats the day off list.
pub fn format_days_off(days: &[DayOffRecord]) -> String {
    let mut output = String::new();

    if days.is_empty() {
        writeln!(output, "No days off configured.").unwrap();
        return output;
    }

    writeln!(output, "DAYS OFF").unwrap();
    writeln!(output, "────────").unwrap();
    for day in days {
        writeln!(output, "{}  {}", day.date, day.kind).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output, "{} total", days.len()).unwrap();

    output
}

/// Lists all days off.
pub fn list_days_off(db: &Database) -> Result<()> {
    let days = db.list_days_off()?;
    print!("{}", format_days_off(&days));
    Ok(())
}

/// Sets the relative weight for one month.
pub fn set_weight(db: &Database, year: i32, month: u32, weight: f64) -> Result<()> {
    validate_year(year)?;
    validate_month(month)?;
    validate_weight(weight)?;
    db.set_monthly_weight(year, month, weight)?;
    println!("Weight for {} {year} set to {weight}.", month_abbrev(month));
    Ok(())
}

/// Formats the weight list for a year.
pub fn format_weights(year: i32, weights: &[MonthlyWeightRecord]) -> String {
    let mut output = String::new();

    if weights.is_empty() {
        writeln!(
            output,
            "No weights configured for {year}. All months default to 1.0."
        )
        .unwrap();
        return output;
    }

    writeln!(output, "MONTHLY WEIGHTS: {year}").unwrap();
    writeln!(output, "───────────────").unwrap();
    for weight in weights {
        writeln!(output, "{}  {:.2}", month_abbrev(weight.month), weight.weight).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output, "Unlisted months default to 1.0.").unwrap();

    output
}

/// Lists the weights configured for a year.
pub fn list_weights(db: &Database, year: i32) -> Result<()> {
    validate_year(year)?;
    let weights = db.list_monthly_weights(year)?;
    print!("{}", format_weights(year, &weights));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn set_goal_persists_and_replaces() {
        let db = Database::open_in_memory().unwrap();
        set_goal(&db, 2025, 1800.0).unwrap();
        set_goal(&db, 2025, 2000.0).unwrap();

        let goal = db.get_goal(2025).unwrap().unwrap();
        assert_eq!(goal.total_hours, 2000.0);
    }

    #[test]
    fn set_goal_rejects_bad_input() {
        let db = Database::open_in_memory().unwrap();

        let err = set_goal(&db, 1995, 2000.0).unwrap_err();
        assert!(err.to_string().contains("year must be between"));

        let err = set_goal(&db, 2025, 0.0).unwrap_err();
        assert!(err.to_string().contains("annual goal must be between"));
    }

    #[test]
    fn day_off_add_then_remove() {
        let db = Database::open_in_memory().unwrap();
        add_day_off(&db, date(2025, 7, 14), "vacation").unwrap();
        assert_eq!(db.list_days_off().unwrap().len(), 1);

        remove_day_off(&db, date(2025, 7, 14)).unwrap();
        assert!(db.list_days_off().unwrap().is_empty());

        // Removing an unmarked date reports rather than fails.
        remove_day_off(&db, date(2025, 7, 14)).unwrap();
    }

    #[test]
    fn format_days_off_empty() {
        assert_snapshot!(format_days_off(&[]), @"No days off configured.");
    }

    #[test]
    fn format_days_off_lists_dates_and_kinds() {
        let days = vec![
            DayOffRecord {
                date: date(2025, 1, 1),
                kind: "holiday".to_string(),
            },
            DayOffRecord {
                date: date(2025, 7, 14),
                kind: "vacation".to_string(),
            },
        ];

        let output = format_days_off(&days);
        assert!(output.contains("2025-01-01  holiday"));
        assert!(output.contains("2025-07-14  vacation"));
        assert!(output.contains("2 total"));
    }

    #[test]
    fn set_weight_rejects_out_of_range() {
        let db = Database::open_in_memory().unwrap();

        let err = set_weight(&db, 2025, 13, 1.0).unwrap_err();
        assert!(err.to_string().contains("month must be between"));

        let err = set_weight(&db, 2025, 6, 2.5).unwrap_err();
        assert!(err.to_string().contains("monthly weight must be between"));
    }

    #[test]
    fn format_weights_empty_mentions_default() {
        assert_snapshot!(
            format_weights(2025, &[]),
            @"No weights configured for 2025. All months default to 1.0."
        );
    }

    #[test]
    fn format_weights_lists_months() {
        let weights = vec![
            MonthlyWeightRecord {
                year: 2025,
                month: 6,
                weight: 0.8,
            },
            MonthlyWeightRecord {
                year: 2025,
                month: 12,
                weight: 1.2,
            },
        ];

        let output = format_weights(2025, &weights);
        assert!(output.contains("MONTHLY WEIGHTS: 2025"));
        assert!(output.contains("Jun  0.80"));
        assert!(output.contains("Dec  1.20"));
        assert!(output.contains("Unlisted months default to 1.0."));
    }
}
