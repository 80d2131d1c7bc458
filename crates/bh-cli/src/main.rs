use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bh_cli::commands::{calendar, log, plan, setup, status};
use bh_cli::{Cli, Commands, Config, DayOffAction, SetupAction, WeightAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(bh_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = bh_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn current_year() -> i32 {
    Local::now().date_naive().year()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Setup { action }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            match action {
                SetupAction::Goal { year, hours } => setup::set_goal(&db, *year, *hours)?,
                SetupAction::DayOff { action } => match action {
                    DayOffAction::Add { date, kind } => setup::add_day_off(&db, *date, kind)?,
                    DayOffAction::Remove { date } => setup::remove_day_off(&db, *date)?,
                    DayOffAction::List => setup::list_days_off(&db)?,
                },
                SetupAction::Weight { action } => match action {
                    WeightAction::Set {
                        year,
                        month,
                        weight,
                    } => setup::set_weight(&db, *year, *month, *weight)?,
                    WeightAction::List { year } => {
                        setup::list_weights(&db, year.unwrap_or_else(current_year))?;
                    }
                },
            }
        }
        Some(Commands::Plan { year, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            plan::run(
                &db,
                year.unwrap_or_else(current_year),
                *json,
                &config.plan_config(),
            )?;
        }
        Some(Commands::Log {
            date,
            hours,
            target_override,
        }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            log::run(&db, *date, *hours, *target_override)?;
        }
        Some(Commands::Status { year, json, today }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            status::run(
                &db,
                year.unwrap_or_else(|| today.year()),
                *json,
                today,
                &config.plan_config(),
            )?;
        }
        Some(Commands::Calendar { year, month, today }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            calendar::run(
                &db,
                year.unwrap_or_else(|| today.year()),
                month.unwrap_or_else(|| today.month()),
                today,
                &config.plan_config(),
            )?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
