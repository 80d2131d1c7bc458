//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Billable hours planner.
///
/// Spreads a yearly billing goal across working days, records hours as you
/// bill them, and reports whether you are ahead of or behind plan.
#[derive(Debug, Parser)]
#[command(name = "bh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configure the yearly goal, days off, and monthly weights.
    Setup {
        #[command(subcommand)]
        action: SetupAction,
    },

    /// Show the daily target plan for a year.
    Plan {
        /// Year to plan (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Record billed hours for a day.
    Log {
        /// The day the hours were billed (YYYY-MM-DD).
        date: NaiveDate,

        /// Hours billed, between 0 and 24.
        hours: f64,

        /// Replace the planned target for this day.
        #[arg(long)]
        target_override: Option<f64>,
    },

    /// Show progress against the plan.
    Status {
        /// Year to report on (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Evaluate progress as of this date instead of today.
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Show a month grid with target and logged hours per day.
    Calendar {
        /// Year to show (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month).
        #[arg(long)]
        month: Option<u32>,

        /// Mark this date instead of today.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

/// Setup steps. Each step persists immediately; run them in any order.
#[derive(Debug, Subcommand)]
pub enum SetupAction {
    /// Set the total billable hours goal for a year.
    Goal {
        /// Year the goal applies to.
        #[arg(long)]
        year: i32,

        /// Total billable hours for the year.
        #[arg(long)]
        hours: f64,
    },

    /// Manage days off.
    DayOff {
        #[command(subcommand)]
        action: DayOffAction,
    },

    /// Manage monthly weights.
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },
}

/// Day off actions.
#[derive(Debug, Subcommand)]
pub enum DayOffAction {
    /// Mark a date as a day off.
    Add {
        /// The date to mark (YYYY-MM-DD).
        date: NaiveDate,

        /// Why the day is off (e.g. holiday, vacation, personal).
        #[arg(long, default_value = "holiday")]
        kind: String,
    },

    /// Unmark a day off.
    Remove {
        /// The date to unmark (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// List all days off.
    List,
}

/// Monthly weight actions.
#[derive(Debug, Subcommand)]
pub enum WeightAction {
    /// Set the relative weight for one month.
    Set {
        /// Year the weight applies to.
        #[arg(long)]
        year: i32,

        /// Month the weight applies to, 1-12.
        #[arg(long)]
        month: u32,

        /// Relative weight between 0.1 and 2.0.
        #[arg(long)]
        weight: f64,
    },

    /// List the weights configured for a year.
    List {
        /// Year to list (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,
    },
}
