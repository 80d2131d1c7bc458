//! Calendar command rendering a month grid of targets and logged hours.
//!
//! Weeks run Monday through Sunday. Each week prints three rows: day
//! numbers, target hours, and logged hours in parentheses.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;
use bh_core::{PlanConfig, month_weeks, validate_month};
use bh_db::Database;
use chrono::{Datelike, NaiveDate};

use crate::commands::month_name;
use crate::commands::plan::build_plan;

/// One renderable day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub target_hours: f64,
    pub logged_hours: f64,
    pub is_today: bool,
}

/// Computed grid for one month: Monday-first weeks with `None` padding
/// outside the month.
#[derive(Debug)]
pub struct CalendarData {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<CalendarDay>; 7]>,
}

// ========== Calendar Generation ==========

/// Generates the grid for one month from the database.
pub fn generate_calendar_data(
    db: &Database,
    year: i32,
    month: u32,
    today: NaiveDate,
    plan_config: &PlanConfig,
) -> Result<CalendarData> {
    validate_month(month)?;
    let plan = build_plan(db, year, plan_config)?;

    let logged: BTreeMap<NaiveDate, f64> = db
        .list_daily_logs()?
        .into_iter()
        .map(|entry| (entry.date, entry.hours_billed))
        .collect();

    let weeks = month_weeks(year, month)
        .into_iter()
        .map(|week| {
            week.map(|slot| {
                slot.map(|date| CalendarDay {
                    date,
                    target_hours: plan.daily_targets.get(&date).copied().unwrap_or(0.0),
                    logged_hours: logged.get(&date).copied().unwrap_or(0.0),
                    is_today: date == today,
                })
            })
        })
        .collect();

    Ok(CalendarData { year, month, weeks })
}

// ========== Output ==========

fn blank_cell() -> String {
    " ".repeat(7)
}

fn date_cell(day: &CalendarDay) -> String {
    let label = if day.is_today {
        format!("{}*", day.date.day())
    } else {
        day.date.day().to_string()
    };
    format!("{label:>7}")
}

fn target_cell(day: &CalendarDay) -> String {
    if day.target_hours > 0.0 {
        let label = format!("{:.1}", day.target_hours);
        format!("{label:>7}")
    } else {
        format!("{:>7}", "-")
    }
}

fn logged_cell(day: &CalendarDay) -> String {
    if day.logged_hours > 0.0 {
        let label = format!("({:.1})", day.logged_hours);
        format!("{label:>7}")
    } else {
        blank_cell()
    }
}

fn week_row(week: &[Option<CalendarDay>; 7], cell: impl Fn(&CalendarDay) -> String) -> String {
    let cells: Vec<String> = week
        .iter()
        .map(|slot| slot.as_ref().map_or_else(blank_cell, &cell))
        .collect();
    cells.join(" ").trim_end().to_string()
}

/// Formats the month grid.
pub fn format_calendar(data: &CalendarData) -> String {
    let mut output = String::new();

    writeln!(output, "CALENDAR: {} {}", month_name(data.month), data.year).unwrap();
    writeln!(output).unwrap();

    let header: Vec<String> = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .iter()
        .map(|day| format!("{day:>7}"))
        .collect();
    writeln!(output, "{}", header.join(" ")).unwrap();

    for (index, week) in data.weeks.iter().enumerate() {
        writeln!(output, "{}", week_row(week, date_cell)).unwrap();
        writeln!(output, "{}", week_row(week, target_cell)).unwrap();
        let logged_row = week_row(week, logged_cell);
        if !logged_row.is_empty() {
            writeln!(output, "{logged_row}").unwrap();
        }
        if index + 1 < data.weeks.len() {
            writeln!(output).unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "Logged hours in parentheses. * marks today.").unwrap();

    output
}

// ========== Public Interface ==========

/// Runs the calendar command.
pub fn run(
    db: &Database,
    year: i32,
    month: u32,
    today: NaiveDate,
    plan_config: &PlanConfig,
) -> Result<()> {
    let data = generate_calendar_data(db, year, month, today, plan_config)?;
    print!("{}", format_calendar(&data));
    Ok(())
}
